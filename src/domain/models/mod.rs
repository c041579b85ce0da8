//! Domain models for the agent mesh.

pub mod agent;
pub mod config;
pub mod log_entry;
pub mod plan;
pub mod stage;

pub use agent::{Agent, AgentId, AgentRole, AgentStatus, Position, MESH_SIZE};
pub use config::{Config, GeneratorConfig, LogFormat, LoggingConfig, RotationPolicy};
pub use log_entry::{LogEntry, LOG_CAPACITY};
pub use plan::{Plan, PlanDocument, PlanRole, PLAN_SIZE};
pub use stage::Stage;
