//! Results of resolving a single order.
//!
//! Illegal-but-expected orders are ordinary results here, not errors: the
//! tick goes on with the remaining orders.

use std::fmt;

use super::record::Action;
use crate::board::TeamId;

/// Why an order was turned down without touching the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The step would leave the map, so the actor stays where it is.
    OutOfBounds,
    Occupied,
    Base,
    Wall,
    /// The actor's profile has zero probability for this capability.
    Incapable,
    NoTarget,
    NoFlag,
    /// The receiving actor has zero grab probability.
    ReceiverCannotCarry,
    ReceiverHasFlag,
    NotEmpty,
    NoWall,
    /// The actor already acted with this order kind during the tick.
    AlreadyActed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::OutOfBounds => "target field is out of bounds",
            Rejection::Occupied => "target field is occupied",
            Rejection::Base => "target field is a base",
            Rejection::Wall => "target field is a wall",
            Rejection::Incapable => "actor lacks the capability",
            Rejection::NoTarget => "no actor on target field",
            Rejection::NoFlag => "no flag on target field",
            Rejection::ReceiverCannotCarry => "receiving actor can not carry a flag",
            Rejection::ReceiverHasFlag => "receiving actor already has a flag",
            Rejection::NotEmpty => "target field is not empty",
            Rejection::NoWall => "target field does not contain a wall",
            Rejection::AlreadyActed => "actor already acted this tick",
        };
        f.write_str(reason)
    }
}

/// Coarse result of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Applied,
    /// A probabilistic trial ran and failed. Counts as the actor's action.
    Missed,
    Rejected(Rejection),
}

/// Everything one resolved order produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Teams credited with a capture (or, for attacks, the kill).
    pub scorers: Vec<TeamId>,
    /// Log record, present only when the order changed the board.
    pub action: Option<Action>,
}

impl Resolution {
    /// The order changed the board.
    pub fn applied(action: Action) -> Self {
        Resolution {
            outcome: Outcome::Applied,
            scorers: Vec::new(),
            action: Some(action),
        }
    }

    /// The trial failed; nothing changed.
    pub fn missed() -> Self {
        Resolution {
            outcome: Outcome::Missed,
            scorers: Vec::new(),
            action: None,
        }
    }

    /// The order was turned down for `reason`.
    pub fn rejected(reason: Rejection) -> Self {
        Resolution {
            outcome: Outcome::Rejected(reason),
            scorers: Vec::new(),
            action: None,
        }
    }

    /// Credits `scorers` with the result.
    pub fn with_scorers(mut self, scorers: Vec<TeamId>) -> Self {
        self.scorers = scorers;
        self
    }

    /// True if the order used up the actor's action of this kind for the tick.
    pub fn attempted(&self) -> bool {
        !matches!(self.outcome, Outcome::Rejected(_))
    }

    /// The rejection reason, if the order was rejected.
    pub fn rejection(&self) -> Option<Rejection> {
        match self.outcome {
            Outcome::Rejected(r) => Some(r),
            _ => None,
        }
    }
}
