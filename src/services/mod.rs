//! Service layer: the mesh store, the timeline, the two model-backed
//! providers and the controller that ties them together.

pub mod mesh_store;
pub mod mission_controller;
pub mod mission_state;
pub mod plan_provider;
pub mod summary_provider;
pub mod timeline;

pub use mesh_store::MeshStore;
pub use mission_controller::{MissionController, RunHandle};
pub use mission_state::{MeshEvent, MeshSnapshot, MissionState};
pub use plan_provider::{PlanOutcome, PlanProvider};
pub use summary_provider::{SummaryOutcome, SummaryProvider, FALLBACK_SUMMARY};
pub use timeline::{RunOutcome, StageEffect, StageStep, TimelineDriver, STAGE_TABLE};

/// Extract a JSON document from model output that may wrap it in a
/// markdown code fence or surround it with prose.
pub fn extract_json_from_response(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        // Skip the language tag line, if any
        let body_start = after_fence.find('\n').map_or(0, |i| i + 1);
        let body = &after_fence[body_start..];
        if let Some(end) = body.find("```") {
            return body[..end].trim().to_string();
        }
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}
