//! Action records: the immutable log entries of a tick.

use serde::Serialize;

use crate::board::{ActorKey, Coordinates, TeamId};

/// One successful board change, appended to the tick's log.
///
/// Flags are named by their owning team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Move {
        actor: ActorKey,
        origin: Coordinates,
        destination: Coordinates,
    },
    Attack {
        actor: ActorKey,
        target: ActorKey,
        destination: Coordinates,
    },
    Grab {
        actor: ActorKey,
        destination: Coordinates,
        flag: TeamId,
        /// The actor the flag was taken from, if it was carried.
        target: Option<ActorKey>,
    },
    Put {
        actor: ActorKey,
        destination: Coordinates,
        flag: TeamId,
        /// The actor that received the flag, if it was handed over.
        target: Option<ActorKey>,
    },
    Build {
        actor: ActorKey,
        destination: Coordinates,
    },
    Destroy {
        actor: ActorKey,
        destination: Coordinates,
    },
}

impl Action {
    /// The actor that performed the action.
    pub fn actor(&self) -> ActorKey {
        match *self {
            Action::Move { actor, .. }
            | Action::Attack { actor, .. }
            | Action::Grab { actor, .. }
            | Action::Put { actor, .. }
            | Action::Build { actor, .. }
            | Action::Destroy { actor, .. } => actor,
        }
    }

    /// The cell the order was aimed at.
    pub fn destination(&self) -> Coordinates {
        match *self {
            Action::Move { destination, .. }
            | Action::Attack { destination, .. }
            | Action::Grab { destination, .. }
            | Action::Put { destination, .. }
            | Action::Build { destination, .. }
            | Action::Destroy { destination, .. } => destination,
        }
    }
}
