//! LLM client for the content-generation service.
//!
//! This crate provides a Rust client to call a Gemini-style
//! `generateContent` endpoint. It handles:
//! - Building the request body and the keyed endpoint URL
//! - Sending one prompt and reading back the first candidate's text
//! - Classifying every failure into a small, closed error enum
//!
//! It never retries. Callers decide what a failure means; the college
//! finder simply falls back to a deterministic answer.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

pub mod gemini;

use gemini::{extract_text, GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Errors that can occur when calling the LLM provider
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to reach LLM provider: {0}")]
    Network(String),

    #[error("LLM provider did not answer in time")]
    Timeout,

    #[error("LLM provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from LLM provider: {0}")]
    InvalidResponse(String),
}

/// Fixed generation parameters sent with every request.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 5000,
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Anything that can turn a prompt into text.
///
/// The response generator only sees this trait, which keeps the network
/// out of its tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Client for the Gemini content-generation API.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    options: GenerationOptions,
}

impl GeminiClient {
    /// Create a client for the public endpoint and default model.
    pub fn new(api_key: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            options,
        }
    }

    /// Point the client at a different base URL (proxies, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `{endpoint}/models/{model}:generateContent`, without the key
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn map_send_error(e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            // The URL carries the API key; never let it reach a log line
            LlmError::Network(e.without_url().to_string())
        }
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest::from_prompt(
            prompt,
            self.options.temperature,
            self.options.max_output_tokens,
        );

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending generateContent request"
        );

        let mut request = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body);
        if let Some(timeout) = self.options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("LLM provider returned status {}", status);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(Self::map_send_error)?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = extract_text(parsed)?;
        debug!(response_len = text.len(), "Received generateContent response");
        Ok(text)
    }
}
