//! Request and response types for the generative-language API

use serde::{Deserialize, Serialize};

/// Body of a `generateContent` call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; the mesh always sends a single user turn
    pub contents: Vec<Content>,

    /// Output controls (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-prompt request.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: Some(text.into()),
                }],
            }],
            generation_config: None,
        }
    }

    /// Ask the service to answer with a JSON document.
    #[must_use]
    pub fn with_json_response(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
        });
        self
    }
}

/// One turn of content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A part of a content turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Envelope returned by `generateContent`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest::prompt("hi").with_json_response();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(value["contents"][0].get("role").is_none());
    }

    #[test]
    fn test_plain_request_has_no_generation_config() {
        let value = serde_json::to_value(GenerateContentRequest::prompt("hi")).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_first_text() {
        let json = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"hello"}]},"finishReason":"STOP"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), Some("hello"));
    }

    #[test]
    fn test_first_text_missing() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_text(), None);

        let json = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), None);
    }
}
