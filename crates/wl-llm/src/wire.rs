//! Messages API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::LlmError;

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Turn; 1],
}

#[derive(Debug, Serialize)]
struct Turn {
    role: &'static str,
    content: String,
}

impl<'a> MessagesRequest<'a> {
    pub(crate) fn single_turn(model: &'a str, max_tokens: u32, temperature: f32, prompt: String) -> Self {
        Self {
            model,
            max_tokens,
            temperature,
            messages: [Turn {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    content: Vec<Block>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    pub(crate) fn hit_token_limit(&self) -> bool {
        self.stop_reason.as_deref() == Some("max_tokens")
    }

    /// Joins the text blocks; other block types are skipped.
    pub(crate) fn into_text(self) -> Result<String, LlmError> {
        let joined = self
            .content
            .into_iter()
            .filter_map(|block| match block {
                Block::Text { text } => Some(text),
                Block::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        let answer = joined.trim();
        if answer.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(answer.to_string())
    }
}

/// Builds an error from a non-success response, preferring the API's own
/// message over the raw body.
pub(crate) fn api_error(status: u16, body: &str) -> LlmError {
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }

    #[derive(Deserialize)]
    struct Detail {
        #[serde(rename = "type")]
        kind: String,
        message: String,
    }

    let message = serde_json::from_str::<Envelope>(body).map_or_else(
        |_| body.trim().to_string(),
        |envelope| format!("{} ({})", envelope.error.message, envelope.error.kind),
    );
    LlmError::Api { status, message }
}
