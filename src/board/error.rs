//! Errors raised while constructing or querying board state.

use super::coordinates::Coordinates;

/// Errors that can occur when building or addressing a board.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinates ({x}/{y}) are outside a map of size {map_size}")]
    OutOfBounds { x: i32, y: i32, map_size: u16 },

    #[error("map size {0} is too small, need at least {min}", min = super::MIN_MAP_SIZE)]
    MapTooSmall(u16),

    #[error("a board needs at least one team")]
    NoTeams,

    #[error("a board needs at least one actor per team")]
    EmptyRoster,

    #[error("duplicate team name '{0}'")]
    DuplicateTeam(String),

    #[error("unknown team '{0}'")]
    UnknownTeam(String),

    #[error("team '{team}' has no actor with id {ident}")]
    UnknownActor { team: String, ident: usize },

    #[error("{kind} has an invalid {capability} probability {value}")]
    InvalidProbability {
        kind: &'static str,
        capability: &'static str,
        value: f64,
    },

    #[error("team '{0}' has no base")]
    MissingBase(String),

    #[error("actor {team}-{ident} was never placed")]
    UnplacedActor { team: String, ident: usize },

    #[error("flag of team '{0}' is claimed by more than one carrier")]
    FlagCarriedTwice(String),

    #[error("no room to place every actor of team '{team}' around its base at {base}")]
    NoSpawnRoom { team: String, base: Coordinates },

    #[error("cell {0} is already occupied")]
    Occupied(Coordinates),

    #[error("board indexes disagree at {0}")]
    Inconsistent(Coordinates),
}
