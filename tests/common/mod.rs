//! Common test utilities for integration tests
//!
//! Canned text generators and controller fixtures shared across the
//! integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use agentmesh::domain::errors::GenerationError;
use agentmesh::domain::ports::{GenerationResult, ResponseFormat, TextGenerator};
use agentmesh::MissionController;

pub const TOKYO_MISSION: &str = "Plan a 3-day trip to Tokyo";

/// Plan reply naming three travel specialists.
pub const TRAVEL_PLAN_JSON: &str = r#"{
  "agents": [
    { "name": "Route Planner", "specialty": "Itineraries", "task": "Draft a day-by-day route" },
    { "name": "Budget Keeper", "specialty": "Finance", "task": "Price transport and lodging" },
    { "name": "Culture Guide", "specialty": "Local Knowledge", "task": "Pick temples and food stops" }
  ]
}"#;

/// Generator with no credential, as when `GEMINI_API_KEY` is unset.
pub struct Offline;

#[async_trait]
impl TextGenerator for Offline {
    async fn generate(&self, _prompt: &str, _format: ResponseFormat) -> GenerationResult<String> {
        Err(GenerationError::MissingCredential)
    }
}

/// Generator answering plan and summary requests with fixed text after
/// an optional delay.
pub struct Scripted {
    pub plan: String,
    pub summary: String,
    pub delay: Duration,
}

impl Scripted {
    pub fn travel() -> Self {
        Self {
            plan: TRAVEL_PLAN_JSON.to_string(),
            summary: "The planner, budget keeper and guide pooled their findings.".to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl TextGenerator for Scripted {
    async fn generate(&self, _prompt: &str, format: ResponseFormat) -> GenerationResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match format {
            ResponseFormat::Json => Ok(self.plan.clone()),
            ResponseFormat::Text => Ok(self.summary.clone()),
        }
    }
}

pub fn offline_controller() -> MissionController {
    MissionController::new(Arc::new(Offline))
}

pub fn scripted_controller(generator: Scripted) -> MissionController {
    MissionController::new(Arc::new(generator))
}
