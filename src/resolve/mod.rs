//! Order resolution.
//!
//! Resolves one order at a time against the board: validation, the
//! probabilistic trial, mutation, and the flag-return and capture rules that
//! follow. The tick-level sequencing lives in [`crate::game`].

pub mod actions;
pub mod outcome;
pub mod record;

pub use actions::BoardActions;
pub use outcome::{Outcome, Rejection, Resolution};
pub use record::Action;
