//! Teams and their compact board-side identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Index of a team in the board's roster.
///
/// Flags and bases are identified by the team that owns them, so a `TeamId`
/// also names "the flag of team N" and "the base of team N".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TeamId(pub usize);

impl TeamId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participating team. Two teams are equal when their names are.
#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    /// Opaque credential, checked by the transport layer, never here.
    pub password: String,
    pub number: usize,
}

impl Team {
    /// A team with number `number`; its id follows the number.
    pub fn new(name: impl Into<String>, password: impl Into<String>, number: usize) -> Self {
        Team {
            name: name.into(),
            password: password.into(),
            number,
        }
    }

    /// The index this team is addressed by.
    pub const fn id(&self) -> TeamId {
        TeamId(self.number)
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_name() {
        let a = Team::new("red", "secret", 0);
        let b = Team::new("red", "other", 3);
        let c = Team::new("blue", "secret", 0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn id_matches_number() {
        assert_eq!(Team::new("red", "", 2).id(), TeamId(2));
    }
}
