//! Claude API integration for the work log.
//!
//! Answers free-form questions about a set of work logs ("what did I ship
//! last week?"). One request per question; no retries or streaming.

mod client;
mod prompt;
mod wire;

use thiserror::Error;

pub use client::{ApiKey, Client};
pub use prompt::ReviewRequest;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is blank")]
    BlankApiKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status from the Messages API.
    #[error("Claude API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API response contained no text")]
    EmptyResponse,
}
