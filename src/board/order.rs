//! Orders submitted by teams, one per actor per kind per tick.
//!
//! Orders arrive already authenticated. They name the actor by team name and
//! per-team id and always point in one of the four directions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coordinates::Direction;

/// The five order kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Move,
    Attack,
    GrabPut,
    Build,
    Destroy,
}

impl OrderKind {
    /// The fixed sequence in which a tick resolves order kinds. Movement lands
    /// before any interaction is evaluated.
    pub const RESOLUTION_SEQUENCE: [OrderKind; 5] = [
        OrderKind::Move,
        OrderKind::GrabPut,
        OrderKind::Attack,
        OrderKind::Destroy,
        OrderKind::Build,
    ];

    /// Lowercase name used on the wire and in logs.
    pub const fn name(self) -> &'static str {
        match self {
            OrderKind::Move => "move",
            OrderKind::Attack => "attack",
            OrderKind::GrabPut => "grabput",
            OrderKind::Build => "build",
            OrderKind::Destroy => "destroy",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A team's request for one of its actors to do one thing this tick.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub kind: OrderKind,
    pub team: String,
    pub actor: usize,
    pub direction: Direction,
}

impl Order {
    /// An order of any kind for actor `actor` of `team`.
    pub fn new(kind: OrderKind, team: impl Into<String>, actor: usize, direction: Direction) -> Self {
        Order {
            kind,
            team: team.into(),
            actor,
            direction,
        }
    }

    /// A move order.
    pub fn moving(team: impl Into<String>, actor: usize, direction: Direction) -> Self {
        Order::new(OrderKind::Move, team, actor, direction)
    }

    /// An attack order.
    pub fn attack(team: impl Into<String>, actor: usize, direction: Direction) -> Self {
        Order::new(OrderKind::Attack, team, actor, direction)
    }

    /// A grab-or-put order.
    pub fn grab_put(team: impl Into<String>, actor: usize, direction: Direction) -> Self {
        Order::new(OrderKind::GrabPut, team, actor, direction)
    }

    /// A build order.
    pub fn build(team: impl Into<String>, actor: usize, direction: Direction) -> Self {
        Order::new(OrderKind::Build, team, actor, direction)
    }

    /// A destroy order.
    pub fn destroy(team: impl Into<String>, actor: usize, direction: Direction) -> Self {
        Order::new(OrderKind::Destroy, team, actor, direction)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} order by {}-{} -> {}", self.kind, self.team, self.actor, self.direction)
    }
}
