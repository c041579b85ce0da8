//! Domain errors for the agent mesh.

use thiserror::Error;

use super::models::{AgentId, Stage};

/// Reasons a generative text request produced nothing usable.
///
/// Providers never propagate these; they select the fallback path and
/// keep the error as the recorded reason.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Violations of the five-agent roster invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Expected {expected} agents, got {actual}")]
    AgentCountMismatch { expected: usize, actual: usize },

    #[error("Agent at position {index} does not match slot {expected}")]
    AgentIdentityMismatch { index: usize, expected: AgentId },

    #[error("Agent not found: {0}")]
    UnknownAgent(AgentId),
}

/// Requests the mission controller refuses without touching state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissionError {
    #[error("Mission text is empty")]
    EmptyMission,

    #[error("A mission is already running")]
    RunInProgress,

    #[error("Report is only available after completion (current stage {stage})")]
    ReportUnavailable { stage: Stage },

    #[error("Report already generated for this run")]
    ReportAlreadyGenerated,

    #[error("Report generation already in progress")]
    ReportInProgress,
}

pub type MissionResult<T> = Result<T, MissionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GenerationError::Status { status: 503, body: "busy".to_string() }.to_string(),
            "Service returned 503: busy"
        );
        assert_eq!(
            MissionError::ReportUnavailable { stage: Stage::Distribution }.to_string(),
            "Report is only available after completion (current stage 4 (distribution))"
        );
        assert_eq!(
            StoreError::UnknownAgent(AgentId::WORKER_B).to_string(),
            "Agent not found: 5"
        );
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: GenerationError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }
}
