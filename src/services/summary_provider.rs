//! Mission report: a short prose summary of the log feed.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::ports::{ResponseFormat, TextGenerator};

/// Sentence used whenever no summary could be generated.
pub const FALLBACK_SUMMARY: &str = "The agents collaborated effectively to break down the mission, gather the necessary resources, and verify the final output.";

/// Result of a summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Generated(String),
    Fallback { text: String, reason: String },
}

impl SummaryOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Fallback { text, .. } => text,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Summarizes a mission transcript with the generative text service.
#[derive(Clone)]
pub struct SummaryProvider {
    generator: Arc<dyn TextGenerator>,
}

impl SummaryProvider {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Summarize `transcript` (`[source]: message` lines). Never fails.
    pub async fn summarize(&self, transcript: &str) -> SummaryOutcome {
        let prompt = build_summary_prompt(transcript);

        match self.generator.generate(&prompt, ResponseFormat::Text).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(chars = text.len(), "summary generated");
                SummaryOutcome::Generated(text.trim().to_string())
            }
            Ok(_) => {
                warn!("summary response was blank, using fallback");
                SummaryOutcome::Fallback {
                    text: FALLBACK_SUMMARY.to_string(),
                    reason: "Response contained no text".to_string(),
                }
            }
            Err(err) => {
                warn!(error = %err, "summary failed, using fallback");
                SummaryOutcome::Fallback {
                    text: FALLBACK_SUMMARY.to_string(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

fn build_summary_prompt(transcript: &str) -> String {
    format!(
        "Here is the activity log of a team of AI agents working on a mission:\n\n{transcript}\n\n\
         Summarize how the agents collaborated in 2-3 sentences."
    )
}
