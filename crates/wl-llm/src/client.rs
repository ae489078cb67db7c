use std::fmt;
use std::time::Duration;

use crate::LlmError;
use crate::prompt::{ReviewRequest, review_prompt};
use crate::wire::{MessagesRequest, MessagesResponse, api_error};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.3;

/// An Anthropic API key. Surrounding whitespace is dropped and the key is
/// never shown by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, LlmError> {
        let key = key.into();
        let key = key.trim();
        if key.is_empty() {
            return Err(LlmError::BlankApiKey);
        }
        Ok(Self(key.to_string()))
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Messages API client. Clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    key: ApiKey,
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let key = ApiKey::new(api_key)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, key })
    }

    /// Sends the review prompt and returns the model's answer, trimmed.
    pub async fn generate(&self, model: &str, request: &ReviewRequest) -> Result<String, LlmError> {
        let body = MessagesRequest::single_turn(model, MAX_TOKENS, TEMPERATURE, review_prompt(request));
        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", self.key.expose())
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(model, %status, "received API response");
        let text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        let reply: MessagesResponse = serde_json::from_str(&text)?;
        if reply.hit_token_limit() {
            tracing::warn!(model, max_tokens = MAX_TOKENS, "answer was cut off");
        }
        reply.into_text()
    }
}
