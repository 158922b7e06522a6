//! Game configuration.
//!
//! A [`GameConfig`] is read from TOML (usually `ascifight.toml`) and carries
//! the team list, the actor roster, and the immutable [`Ruleset`] that is
//! injected into the game and the resolver.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::{ActorKind, SPAWN_RADIUS};

/// Smallest map the ring layout can place bases on.
pub const MIN_PLAYABLE_MAP_SIZE: u16 = 10;

/// Actors that fit in the spawn square around a base, the base excluded.
const fn max_roster() -> usize {
    let side = (2 * SPAWN_RADIUS + 1) as usize;
    side * side - 1
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("need at least two teams, got {0}")]
    TooFewTeams(usize),

    #[error("duplicate team name '{0}'")]
    DuplicateTeam(String),

    #[error("actor roster is empty")]
    EmptyRoster,

    #[error("{0} actors per team do not fit around a base, at most {max}", max = max_roster())]
    RosterTooLarge(usize),

    #[error("map size {0} is too small, need at least {min}", min = MIN_PLAYABLE_MAP_SIZE)]
    MapTooSmall(u16),

    #[error("max_ticks must be positive")]
    NoTicks,
}

/// Scoring and rule options. Immutable for the duration of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    pub map_size: u16,
    /// A team may only capture while its own flag rests at its own base.
    pub home_flag_required: bool,
    pub capture_score: i64,
    pub kill_score: i64,
    pub winning_bonus: i64,
    pub max_ticks: u32,
    pub max_score: i64,
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset {
            map_size: 15,
            home_flag_required: false,
            capture_score: 10,
            kill_score: 1,
            winning_bonus: 5,
            max_ticks: 300,
            max_score: 1000,
        }
    }
}

/// A team entry in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Everything needed to set up and run a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub teams: Vec<TeamConfig>,
    pub actors: Vec<ActorKind>,
    pub rules: Ruleset,
    pub scores_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let team = |name: &str| TeamConfig {
            name: name.to_string(),
            password: String::new(),
        };
        GameConfig {
            teams: vec![team("red"), team("green"), team("yellow"), team("blue")],
            actors: vec![
                ActorKind::Generalist,
                ActorKind::Runner,
                ActorKind::Attacker,
                ActorKind::Attacker,
                ActorKind::Guardian,
                ActorKind::Builder,
                ActorKind::Destroyer,
            ],
            rules: Ruleset::default(),
            scores_file: PathBuf::from("scores.txt"),
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Checks the values serde cannot. Tight maps can still run out of
    /// spawn room, which [`ring_layout`](crate::setup::ring_layout) reports.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.teams.len() < 2 {
            return Err(ConfigError::TooFewTeams(self.teams.len()));
        }
        for (i, team) in self.teams.iter().enumerate() {
            if self.teams[..i].iter().any(|t| t.name == team.name) {
                return Err(ConfigError::DuplicateTeam(team.name.clone()));
            }
        }
        if self.actors.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.actors.len() > max_roster() {
            return Err(ConfigError::RosterTooLarge(self.actors.len()));
        }
        if self.rules.map_size < MIN_PLAYABLE_MAP_SIZE {
            return Err(ConfigError::MapTooSmall(self.rules.map_size));
        }
        if self.rules.max_ticks == 0 {
            return Err(ConfigError::NoTicks);
        }
        Ok(())
    }
}
