//! Batch simulation of complete games between random agents.
//!
//! Every game gets its own RNG derived from the base seed and its game id,
//! so a seeded run produces the same games whatever the thread count.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::GameConfig;
use crate::game::{Game, GameError};
use crate::movegen::random_batch;
use crate::score_log::{ScoreLog, ScoreLogError};

/// Errors that can occur while running a batch of games.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("simulation worker thread panicked")]
    WorkerPanicked,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub games: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 1,
            threads: 1,
            seed: 0,
            game: GameConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamScore {
    pub team: String,
    pub score: i64,
}

/// Result of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game_id: usize,
    pub ticks: u32,
    /// Applied actions over the whole game.
    pub actions: usize,
    /// Final standings with the winning bonus applied, highest first.
    pub standings: Vec<TeamScore>,
}

impl GameSummary {
    /// The strictly leading team, if there is one.
    pub fn winner(&self) -> Option<&str> {
        match self.standings.as_slice() {
            [first, second, ..] if first.score == second.score => None,
            [first, ..] => Some(&first.team),
            [] => None,
        }
    }

    /// Appends the standings to the score log, one line per team.
    pub fn record(&self, log: &ScoreLog) -> Result<(), ScoreLogError> {
        log.append(self.standings.iter().map(|s| (s.team.as_str(), s.score)))
    }
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one game to its end. `rng` drives the agents; the game's own
/// random source is forked from it.
pub fn play_game(config: &GameConfig, game_id: usize, rng: &mut SmallRng) -> Result<GameSummary, GameError> {
    let game_rng = SmallRng::seed_from_u64(rng.gen());
    let mut game = Game::initiate(config, game_rng)?;

    let mut actions = 0;
    while !game.check_game_end() {
        let orders = random_batch(game.board(), rng);
        actions += game.execute_game_step(&orders)?.len();
    }

    let standings = game
        .final_scores()
        .into_iter()
        .map(|(team, score)| TeamScore {
            team: team.name.clone(),
            score,
        })
        .collect();
    Ok(GameSummary {
        game_id,
        ticks: game.tick(),
        actions,
        standings,
    })
}

/// Plays all configured games, calling `on_game` on the calling thread for
/// each finished one. Games run concurrently when `threads > 1`.
pub fn run_games<F>(config: &SimulationConfig, on_game: F) -> Result<(), SimulationError>
where
    F: FnMut(GameSummary),
{
    if config.threads > 1 {
        run_parallel(config, on_game)
    } else {
        run_sequential(config, on_game)
    }
}

fn run_sequential<F>(config: &SimulationConfig, mut on_game: F) -> Result<(), SimulationError>
where
    F: FnMut(GameSummary),
{
    for i in 0..config.games {
        let mut rng = game_rng(config.seed, i);
        on_game(play_game(&config.game, i, &mut rng)?);
    }
    Ok(())
}

/// Uses a channel to deliver finished games from the worker threads. The
/// first failing game is reported once all workers are done.
fn run_parallel<F>(config: &SimulationConfig, mut on_game: F) -> Result<(), SimulationError>
where
    F: FnMut(GameSummary),
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<Result<GameSummary, GameError>>();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config.games).into_par_iter().for_each_with(tx, |tx, i| {
                let mut rng = game_rng(config.seed, i);
                let _ = tx.send(play_game(&config.game, i, &mut rng));
            });
        });
    });

    let mut failure = None;
    for result in rx {
        match result {
            Ok(summary) => on_game(summary),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }
    handle.join().map_err(|_| SimulationError::WorkerPanicked)?;

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
