use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of agents in the mesh. The roster never grows or shrinks.
pub const MESH_SIZE: usize = 5;

/// Stable identifier of one of the five mesh slots (`"1"` through `"5"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AgentId(u8);

impl AgentId {
    pub const ORCHESTRATOR: Self = Self(1);
    pub const SPECIALIST_A: Self = Self(2);
    pub const SPECIALIST_B: Self = Self(3);
    pub const WORKER_A: Self = Self(4);
    pub const WORKER_B: Self = Self(5);

    /// All ids in roster order.
    pub const ALL: [Self; MESH_SIZE] = [
        Self::ORCHESTRATOR,
        Self::SPECIALIST_A,
        Self::SPECIALIST_B,
        Self::WORKER_A,
        Self::WORKER_B,
    ];

    /// Slots that receive the three plan entries, in plan order.
    pub const PLAN_SLOTS: [Self; 3] = [Self::SPECIALIST_A, Self::SPECIALIST_B, Self::WORKER_A];

    /// Build an id from its slot number, if it names a mesh slot.
    pub const fn new(slot: u8) -> Option<Self> {
        if slot >= 1 && slot as usize <= MESH_SIZE {
            Some(Self(slot))
        } else {
            None
        }
    }

    pub const fn slot(self) -> u8 {
        self.0
    }

    /// The role that is permanently bound to this slot.
    pub const fn role(self) -> AgentRole {
        match self.0 {
            1 => AgentRole::Orchestrator,
            2 | 3 => AgentRole::Specialist,
            _ => AgentRole::Worker,
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgentId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| anyhow::anyhow!("Invalid agent id: {s}"))
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for AgentId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Role category of a mesh slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    Orchestrator,
    Specialist,
    Worker,
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orchestrator => write!(f, "Orchestrator"),
            Self::Specialist => write!(f, "Specialist"),
            Self::Worker => write!(f, "Worker"),
        }
    }
}

/// Agent status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Working,
    Communicating,
    Success,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Working => write!(f, "working"),
            Self::Communicating => write!(f, "communicating"),
            Self::Success => write!(f, "success"),
        }
    }
}

impl FromStr for AgentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "working" => Ok(Self::Working),
            "communicating" => Ok(Self::Communicating),
            "success" => Ok(Self::Success),
            _ => Err(anyhow::anyhow!("Invalid agent status: {s}")),
        }
    }
}

/// Fixed display position of an agent on the mesh, in percent of the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One node of the agent mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Slot identifier ("1".."5")
    pub id: AgentId,

    /// Display name
    pub name: String,

    /// Role category, bound to the slot
    pub role: AgentRole,

    /// Where the node is drawn
    pub position: Position,

    /// Current status
    pub status: AgentStatus,

    /// Specialty label
    pub specialty: String,

    /// Task currently assigned, if any
    pub current_task: Option<String>,
}

impl Agent {
    /// Create an idle agent for `id`. The role is derived from the slot.
    pub fn new(id: AgentId, name: impl Into<String>, position: Position, specialty: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: id.role(),
            position,
            status: AgentStatus::Idle,
            specialty: specialty.into(),
            current_task: None,
        }
    }

    /// Copy of this agent with a different status.
    #[must_use]
    pub fn with_status(&self, status: AgentStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// The five agents every mesh starts from.
    pub fn template() -> Vec<Self> {
        vec![
            Self::new(AgentId::ORCHESTRATOR, "Orchestrator", Position::new(50.0, 15.0), "Coordination"),
            Self::new(AgentId::SPECIALIST_A, "Specialist Alpha", Position::new(20.0, 50.0), "Research"),
            Self::new(AgentId::SPECIALIST_B, "Specialist Beta", Position::new(80.0, 50.0), "Analysis"),
            Self::new(AgentId::WORKER_A, "Worker One", Position::new(35.0, 85.0), "Execution"),
            Self::new(AgentId::WORKER_B, "Worker Two", Position::new(65.0, 85.0), "Support"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_status_display() {
        assert_eq!(AgentStatus::Idle.to_string(), "idle");
        assert_eq!(AgentStatus::Working.to_string(), "working");
        assert_eq!(AgentStatus::Communicating.to_string(), "communicating");
        assert_eq!(AgentStatus::Success.to_string(), "success");
    }

    #[test]
    fn test_agent_status_from_str() {
        assert_eq!("idle".parse::<AgentStatus>().unwrap(), AgentStatus::Idle);
        assert_eq!("WORKING".parse::<AgentStatus>().unwrap(), AgentStatus::Working);
        assert_eq!(
            "communicating".parse::<AgentStatus>().unwrap(),
            AgentStatus::Communicating
        );
        assert!("busy".parse::<AgentStatus>().is_err());
    }

    #[test]
    fn test_agent_id_bounds() {
        assert!(AgentId::new(0).is_none());
        assert!(AgentId::new(6).is_none());
        assert_eq!(AgentId::new(3), Some(AgentId::SPECIALIST_B));
        assert_eq!("5".parse::<AgentId>().unwrap(), AgentId::WORKER_B);
        assert!("six".parse::<AgentId>().is_err());
    }

    #[test]
    fn test_roles_bound_to_slots() {
        assert_eq!(AgentId::ORCHESTRATOR.role(), AgentRole::Orchestrator);
        assert_eq!(AgentId::SPECIALIST_A.role(), AgentRole::Specialist);
        assert_eq!(AgentId::SPECIALIST_B.role(), AgentRole::Specialist);
        assert_eq!(AgentId::WORKER_A.role(), AgentRole::Worker);
        assert_eq!(AgentId::WORKER_B.role(), AgentRole::Worker);
    }

    #[test]
    fn test_template_shape() {
        let agents = Agent::template();
        assert_eq!(agents.len(), MESH_SIZE);
        for (agent, id) in agents.iter().zip(AgentId::ALL) {
            assert_eq!(agent.id, id);
            assert_eq!(agent.role, id.role());
            assert_eq!(agent.status, AgentStatus::Idle);
            assert!(agent.current_task.is_none());
        }
    }

    #[test]
    fn test_agent_id_serializes_as_string() {
        let json = serde_json::to_string(&AgentId::WORKER_A).unwrap();
        assert_eq!(json, "\"4\"");
        let back: AgentId = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(back, AgentId::WORKER_A);
        assert!(serde_json::from_str::<AgentId>("\"9\"").is_err());
    }
}
