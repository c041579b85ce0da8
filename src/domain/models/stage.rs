use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete point in the scripted mission timeline.
///
/// Stages only move forward while a run is active; reset returns to
/// [`Stage::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    /// Nothing started, or a run is waiting on its plan
    Idle = 0,
    /// Plan resolved, timeline anchored
    Anchored = 1,
    /// Orchestrator assigning roles
    RoleAssignment = 2,
    /// Registry lookup of specialties
    RegistryLookup = 3,
    /// Sub-tasks handed to the mesh
    Distribution = 4,
    /// Agents reporting progress
    Progress = 5,
    /// Every agent reported success
    Complete = 6,
}

impl Stage {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Anchored => "anchored",
            Self::RoleAssignment => "role-assignment",
            Self::RegistryLookup => "registry-lookup",
            Self::Distribution => "distribution",
            Self::Progress => "progress",
            Self::Complete => "complete",
        };
        write!(f, "{} ({label})", self.number())
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Anchored),
            2 => Ok(Self::RoleAssignment),
            3 => Ok(Self::RegistryLookup),
            4 => Ok(Self::Distribution),
            5 => Ok(Self::Progress),
            6 => Ok(Self::Complete),
            other => Err(format!("Invalid stage: {other}")),
        }
    }
}
