//! agentmesh - a five-agent mesh that plans and plays out a mission
//!
//! A mission is handed to a generative text service, which proposes three
//! specialist roles. The mesh folds those roles into its roster and then
//! plays a fixed, timed sequence of stages, logging as it goes. Once the
//! sequence completes, the service can be asked for a short report. When
//! the service is unreachable or unconfigured, built-in fallbacks keep the
//! run going.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): mesh models, error taxonomy, port traits
//! - **Service Layer** (`services`): store, providers, timeline, controller
//! - **Infrastructure Layer** (`infrastructure`): config, credentials,
//!   logging and the HTTP client
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use agentmesh::{GeminiClient, GeminiClientConfig, MissionController};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GeminiClient::new(GeminiClientConfig::default())?;
//!     let controller = MissionController::new(Arc::new(client));
//!     controller.start("Plan a 3-day trip to Tokyo").await?.wait().await;
//!     println!("{}", controller.generate_report().await?.text());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Agent, AgentId, AgentRole, AgentStatus, Config, GeneratorConfig, LogEntry, LoggingConfig,
    Plan, PlanRole, Stage,
};
pub use domain::ports::{ResponseFormat, TextGenerator};
pub use domain::{GenerationError, MissionError, StoreError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::gemini::{GeminiClient, GeminiClientConfig};
pub use services::{
    MeshEvent, MeshSnapshot, MissionController, PlanOutcome, PlanProvider, RunOutcome,
    SummaryOutcome, SummaryProvider,
};
