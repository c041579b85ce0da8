use serde::{Deserialize, Serialize};

/// Number of roles every plan contains.
pub const PLAN_SIZE: usize = 3;

/// One role proposed for the mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRole {
    pub name: String,
    pub specialty: String,
    pub task: String,
}

impl PlanRole {
    pub fn new(name: impl Into<String>, specialty: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
            task: task.into(),
        }
    }
}

/// Three-role decomposition of a mission.
///
/// Roles map onto agent slots 2, 3 and 4 in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    roles: [PlanRole; PLAN_SIZE],
}

impl Plan {
    pub const fn new(roles: [PlanRole; PLAN_SIZE]) -> Self {
        Self { roles }
    }

    /// Canned plan used whenever the planning model gives nothing usable.
    pub fn fallback() -> Self {
        Self::new([
            PlanRole::new("Logic Bot", "Planning", "Analyzing requirements"),
            PlanRole::new("Resource Bot", "Logistics", "Gathering resources"),
            PlanRole::new("Review Bot", "Quality Control", "Verifying output"),
        ])
    }

    pub const fn roles(&self) -> &[PlanRole; PLAN_SIZE] {
        &self.roles
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.name.as_str())
    }

    pub fn specialties(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.specialty.as_str())
    }
}

impl TryFrom<Vec<PlanRole>> for Plan {
    type Error = usize;

    /// Fails with the received length unless exactly three roles are given.
    fn try_from(roles: Vec<PlanRole>) -> Result<Self, Self::Error> {
        let len = roles.len();
        <[PlanRole; PLAN_SIZE]>::try_from(roles)
            .map(Self::new)
            .map_err(|_| len)
    }
}

/// Wire shape the planning model is asked to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    pub agents: Vec<PlanRole>,
}
