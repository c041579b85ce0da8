//! Mission planning through the generative text service.
//!
//! Asks the model for three `{name, specialty, task}` roles. Any failure,
//! including a well-formed answer with the wrong number of roles, yields
//! the canned plan instead; the caller learns which path ran from the
//! [`PlanOutcome`] variant.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::GenerationError;
use crate::domain::models::{Plan, PlanDocument};
use crate::domain::ports::{ResponseFormat, TextGenerator};

/// Result of a planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The model produced a usable plan
    Generated(Plan),
    /// The canned plan was substituted; `reason` says why
    Fallback { plan: Plan, reason: String },
}

impl PlanOutcome {
    pub const fn plan(&self) -> &Plan {
        match self {
            Self::Generated(plan) | Self::Fallback { plan, .. } => plan,
        }
    }

    pub fn into_plan(self) -> Plan {
        match self {
            Self::Generated(plan) | Self::Fallback { plan, .. } => plan,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Plans a mission with the generative text service.
#[derive(Clone)]
pub struct PlanProvider {
    generator: Arc<dyn TextGenerator>,
}

impl PlanProvider {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce exactly three roles for `mission`. Never fails.
    pub async fn plan(&self, mission: &str) -> PlanOutcome {
        let prompt = build_plan_prompt(mission);

        match self.request_plan(&prompt).await {
            Ok(plan) => {
                info!(roles = ?plan.names().collect::<Vec<_>>(), "plan generated");
                PlanOutcome::Generated(plan)
            }
            Err(err) => {
                warn!(error = %err, "planning failed, using fallback plan");
                PlanOutcome::Fallback {
                    plan: Plan::fallback(),
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn request_plan(&self, prompt: &str) -> Result<Plan, GenerationError> {
        let text = self.generator.generate(prompt, ResponseFormat::Json).await?;
        parse_plan(&text)
    }
}

/// Parse the model's text as a plan document holding exactly three roles.
pub fn parse_plan(text: &str) -> Result<Plan, GenerationError> {
    let json = super::extract_json_from_response(text);
    let document: PlanDocument = serde_json::from_str(&json)?;
    Plan::try_from(document.agents).map_err(|count| {
        GenerationError::Malformed(format!("expected 3 agents, got {count}"))
    })
}

fn build_plan_prompt(mission: &str) -> String {
    format!(
        r#"You are the orchestrator of a small multi-agent team.

Mission: "{mission}"

Design a team of exactly 3 specialized AI agents that could accomplish this mission.
For each agent give a short name, a one or two word specialty, and the concrete task it will perform.

Respond with a JSON object of this shape:
{{
  "agents": [
    {{ "name": "Agent name", "specialty": "Specialty", "task": "Task description" }}
  ]
}}

IMPORTANT: Output ONLY the JSON object, no other text."#
    )
}
