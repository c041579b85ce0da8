//! Domain layer for agentmesh
//!
//! This module contains the mesh models, the error taxonomy, and the port
//! traits the services depend on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{GenerationError, MissionError, MissionResult, StoreError};
