use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::domain::errors::GenerationError;
use crate::domain::models::GeneratorConfig;
use crate::domain::ports::{GenerationResult, ResponseFormat, TextGenerator};
use crate::infrastructure::credentials::{redact, resolve_api_key};

/// Configuration for the generative-language HTTP client
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API key, passed as the `key` query parameter. `None` makes every
    /// request fail fast with [`GenerationError::MissingCredential`].
    pub api_key: Option<String>,

    /// Base URL of the service
    pub base_url: String,

    /// Model name placed in the request path
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiClientConfig {
    /// Build from the loaded configuration, resolving the key from the
    /// environment when the config has none.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            api_key: resolve_api_key(config),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

/// HTTP client for the generative-language `generateContent` endpoint
///
/// One request per call: no retry and no rate limiting, since every caller
/// has a fallback for any failure.
pub struct GeminiClient {
    http_client: ReqwestClient,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> GenerationResult<Self> {
        info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = config.timeout_secs,
            api_key = %config.api_key.as_deref().map_or_else(|| "<unset>".to_string(), redact),
            "initializing generative text client"
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(2)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: config.api_key,
            base_url: config.base_url,
            model: config.model,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Handle HTTP response and extract the first candidate's text
    async fn handle_response(response: Response) -> GenerationResult<String> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!("API error ({}): {}", status, body);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;

        envelope
            .first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(GenerationError::EmptyResponse)
    }
}

fn map_transport_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Network(err.to_string())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str, format: ResponseFormat) -> GenerationResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let mut request = GenerateContentRequest::prompt(prompt);
        if format == ResponseFormat::Json {
            request = request.with_json_response();
        }

        let url = self.endpoint();
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        Self::handle_response(response).await
    }
}
