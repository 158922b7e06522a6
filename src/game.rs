//! Tick orchestrator.
//!
//! A [`Game`] owns the board, the ruleset, the random source, the tick
//! counter and the scores. Each call to [`Game::execute_game_step`] resolves
//! one finished batch of orders, kind by kind in
//! [`OrderKind::RESOLUTION_SEQUENCE`], with at most one action of each kind
//! per actor.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{info, info_span, warn};

use crate::board::{ActorKey, BoardData, BoardError, Order, OrderKind, Team, TeamId};
use crate::config::{ConfigError, GameConfig, Ruleset};
use crate::resolve::{Action, BoardActions, Rejection, Resolution};
use crate::score_log::{ScoreLog, ScoreLogError};
use crate::setup;

/// Errors that can occur while setting up, running or ending a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Board(BoardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ScoreLog(#[from] ScoreLogError),

    #[error("order references unknown team '{0}'")]
    UnknownTeam(String),

    #[error("order references unknown actor {team}-{ident}")]
    UnknownActor { team: String, ident: usize },
}

impl From<BoardError> for GameError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::UnknownTeam(team) => GameError::UnknownTeam(team),
            BoardError::UnknownActor { team, ident } => GameError::UnknownActor { team, ident },
            other => GameError::Board(other),
        }
    }
}

pub struct Game<R: Rng = SmallRng> {
    board: BoardData,
    rules: Ruleset,
    rng: R,
    tick: u32,
    /// Indexed by team.
    scores: Vec<i64>,
    /// Indexed by team.
    overall_scores: Vec<i64>,
    log: BTreeMap<u32, Vec<Action>>,
}

impl<R: Rng> Game<R> {
    /// Starts a game on a prepared board. Scores start at zero.
    pub fn new(board: BoardData, rules: Ruleset, rng: R) -> Self {
        let teams = board.teams().len();
        Game {
            board,
            rules,
            rng,
            tick: 0,
            scores: vec![0; teams],
            overall_scores: vec![0; teams],
            log: BTreeMap::new(),
        }
    }

    /// Lays out a fresh ring board for `config` and loads the historical
    /// scores from its score log.
    pub fn initiate(config: &GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let board = setup::ring_layout(config, &mut rng)?;
        let mut game = Game::new(board, config.rules.clone(), rng);
        game.load_overall_scores(&ScoreLog::new(&config.scores_file))?;
        Ok(game)
    }

    /// Adds the logged totals of every current team. Unknown names are ignored.
    pub fn load_overall_scores(&mut self, log: &ScoreLog) -> Result<(), GameError> {
        for (name, total) in log.load()? {
            if let Some(team) = self.board.team_id(&name) {
                self.overall_scores[team.index()] += total;
            }
        }
        Ok(())
    }

    /// The current board.
    pub fn board(&self) -> &BoardData {
        &self.board
    }

    /// The rules this game was started with.
    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    /// Ticks played so far.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Current score of `team` in this game.
    pub fn score(&self, team: TeamId) -> i64 {
        self.scores[team.index()]
    }

    /// Current scores, in team order.
    pub fn scores(&self) -> impl Iterator<Item = (&Team, i64)> + '_ {
        self.board.teams().iter().zip(self.scores.iter().copied())
    }

    /// Historical totals from the score log, in team order.
    pub fn overall_scores(&self) -> impl Iterator<Item = (&Team, i64)> + '_ {
        self.board.teams().iter().zip(self.overall_scores.iter().copied())
    }

    /// The actions applied during `tick`, in resolution order.
    pub fn actions(&self, tick: u32) -> &[Action] {
        self.log.get(&tick).map_or(&[], |a| a.as_slice())
    }

    /// Applied actions of every tick played so far.
    pub fn history(&self) -> &BTreeMap<u32, Vec<Action>> {
        &self.log
    }

    /// Resolves one batch of orders and returns the actions it applied.
    ///
    /// The tick advances even if the batch is empty or refers to an actor
    /// that does not exist; in the latter case nothing is resolved.
    pub fn execute_game_step(&mut self, orders: &[Order]) -> Result<&[Action], GameError> {
        self.tick += 1;
        let span = info_span!("tick", tick = self.tick);
        let _enter = span.enter();

        let keys = orders
            .iter()
            .map(|o| self.board.actor_key(&o.team, o.actor))
            .collect::<Result<Vec<ActorKey>, BoardError>>()?;

        let mut applied = Vec::new();
        let mut actions = BoardActions::new(&mut self.board, &self.rules, &mut self.rng);
        for kind in OrderKind::RESOLUTION_SEQUENCE {
            info!("executing {} orders", kind);
            let mut acted: HashSet<ActorKey> = HashSet::new();

            for (order, key) in orders.iter().zip(&keys).filter(|(o, _)| o.kind == kind) {
                let span = info_span!("order", team = %order.team);
                let _enter = span.enter();
                info!("executing {}", order);

                let resolution = if acted.contains(key) {
                    warn!(actor = %key, "{}", Rejection::AlreadyActed);
                    Resolution::rejected(Rejection::AlreadyActed)
                } else {
                    actions.resolve(kind, *key, order.direction)
                };
                if resolution.attempted() {
                    acted.insert(*key);
                }

                let points = match kind {
                    OrderKind::Attack => self.rules.kill_score,
                    _ => self.rules.capture_score,
                };
                for team in &resolution.scorers {
                    self.scores[team.index()] += points;
                }
                applied.extend(resolution.action);
            }
        }

        Ok(self.log.entry(self.tick).or_insert(applied).as_slice())
    }

    /// True once the tick limit is reached or a team reached the score limit.
    pub fn check_game_end(&self) -> bool {
        self.tick >= self.rules.max_ticks
            || self.scores.iter().any(|s| *s >= self.rules.max_score)
    }

    /// Final standings, highest first. A strictly leading team gets the
    /// winning bonus; a tie at the top gives nobody the bonus.
    pub fn final_scores(&self) -> Vec<(&Team, i64)> {
        let mut standings: Vec<(&Team, i64)> = self.scores().collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        let tied = matches!(standings.as_slice(), [first, second, ..] if first.1 == second.1);
        if !tied {
            if let Some(leader) = standings.first_mut() {
                leader.1 += self.rules.winning_bonus;
            }
        }
        standings
    }

    /// Appends the final standings to the score log.
    ///
    /// Batch runs play games off the calling thread and never call this;
    /// they record the same standings through
    /// [`GameSummary::record`](crate::simulate::GameSummary::record) once a
    /// game is handed back.
    pub fn end_game(&self, log: &ScoreLog) -> Result<Vec<(&Team, i64)>, GameError> {
        let standings = self.final_scores();
        log.append(standings.iter().map(|(team, score)| (team.name.as_str(), *score)))?;
        info!(ticks = self.tick, "game ended");
        Ok(standings)
    }

    /// One-line overall and current score summaries.
    pub fn scoreboard(&self) -> String {
        let line = |scores: Vec<(&Team, i64)>| {
            scores
                .iter()
                .map(|(team, score)| format!("{}: {}", team.name, score))
                .collect::<Vec<_>>()
                .join(" - ")
        };
        format!(
            "Overall Score: {}\nCurrent Score: {}",
            line(self.overall_scores().collect()),
            line(self.scores().collect())
        )
    }
}
