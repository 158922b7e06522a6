//! Actor kinds, capability profiles, and actor identity.
//!
//! Every actor kind is a row in a closed catalog. Behaviour differences
//! between kinds come only from their capability probabilities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::BoardError;
use super::team::TeamId;

/// Success probabilities for each capability. Zero means "cannot do this at all".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapabilityProfile {
    pub grab: f64,
    pub attack: f64,
    pub build: f64,
    pub destroy: f64,
}

impl CapabilityProfile {
    const fn new(grab: f64, attack: f64, build: f64, destroy: f64) -> Self {
        CapabilityProfile { grab, attack, build, destroy }
    }

    fn validate(&self, kind: ActorKind) -> Result<(), BoardError> {
        let fields = [
            ("grab", self.grab),
            ("attack", self.attack),
            ("build", self.build),
            ("destroy", self.destroy),
        ];
        for (capability, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(BoardError::InvalidProbability {
                    kind: kind.name(),
                    capability,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// The closed catalog of actor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Generalist,
    Runner,
    Attacker,
    Guardian,
    Builder,
    Destroyer,
}

impl ActorKind {
    pub const ALL: [ActorKind; 6] = [
        ActorKind::Generalist,
        ActorKind::Runner,
        ActorKind::Attacker,
        ActorKind::Guardian,
        ActorKind::Builder,
        ActorKind::Destroyer,
    ];

    /// Success probabilities for this kind.
    pub const fn profile(self) -> CapabilityProfile {
        match self {
            ActorKind::Generalist => CapabilityProfile::new(1.0, 1.0, 0.0, 0.0),
            ActorKind::Runner => CapabilityProfile::new(1.0, 0.0, 0.0, 0.0),
            ActorKind::Attacker => CapabilityProfile::new(0.0, 1.0, 0.0, 0.0),
            ActorKind::Guardian => CapabilityProfile::new(0.0, 0.0, 0.0, 0.0),
            ActorKind::Builder => CapabilityProfile::new(0.0, 0.0, 0.2, 0.0),
            ActorKind::Destroyer => CapabilityProfile::new(0.0, 0.0, 0.0, 0.25),
        }
    }

    /// Name as written in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            ActorKind::Generalist => "Generalist",
            ActorKind::Runner => "Runner",
            ActorKind::Attacker => "Attacker",
            ActorKind::Guardian => "Guardian",
            ActorKind::Builder => "Builder",
            ActorKind::Destroyer => "Destroyer",
        }
    }

    /// Checks that every probability in the catalog lies in `[0, 1]`.
    pub fn validate_catalog() -> Result<(), BoardError> {
        for kind in ActorKind::ALL {
            kind.profile().validate(kind)?;
        }
        Ok(())
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one actor: its team plus a per-team sequential id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorKey {
    pub team: TeamId,
    pub ident: usize,
}

impl ActorKey {
    pub const fn new(team: TeamId, ident: usize) -> Self {
        ActorKey { team, ident }
    }
}

impl fmt::Display for ActorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team, self.ident)
    }
}

/// An actor on the board. The carried flag is named by its owning team.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub key: ActorKey,
    pub kind: ActorKind,
    pub flag: Option<TeamId>,
}

impl Actor {
    pub fn new(key: ActorKey, kind: ActorKind) -> Self {
        Actor { key, kind, flag: None }
    }

    /// The profile of this actor's kind.
    pub fn profile(&self) -> CapabilityProfile {
        self.kind.profile()
    }

    /// True if the actor can ever grab or carry a flag.
    pub fn can_grab(&self) -> bool {
        self.profile().grab > 0.0
    }

    pub fn can_attack(&self) -> bool {
        self.profile().attack > 0.0
    }

    pub fn can_build(&self) -> bool {
        self.profile().build > 0.0
    }

    pub fn can_destroy(&self) -> bool {
        self.profile().destroy > 0.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.key)
    }
}
