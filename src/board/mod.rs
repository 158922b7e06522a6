//! Board representation.
//!
//! Contains the value types (coordinates, teams, actors, orders) and the
//! authoritative spatial state every other module reads and the resolver
//! writes.

pub mod actor;
pub mod builder;
pub mod coordinates;
pub mod data;
pub mod error;
pub mod order;
pub mod team;

pub use actor::{Actor, ActorKey, ActorKind, CapabilityProfile};
pub use builder::BoardBuilder;
pub use coordinates::{Coordinates, Direction};
pub use data::{BoardData, BoardObject};
pub use error::BoardError;
pub use order::{Order, OrderKind};
pub use team::{Team, TeamId};

/// Smallest map that still fits a full 5x5 spawn area.
pub const MIN_MAP_SIZE: u16 = 5;

/// Half the side of the square around a base where actors spawn.
pub const SPAWN_RADIUS: i32 = 2;
