//! ASCI-fight simulation core.
//!
//! Exposes the board representation, the order resolver, the tick
//! orchestrator, and the random agents used by the simulation binary and
//! integration tests.

pub mod board;
pub mod config;
pub mod game;
pub mod movegen;
pub mod resolve;
pub mod score_log;
pub mod setup;
pub mod simulate;

pub use game::{Game, GameError};
