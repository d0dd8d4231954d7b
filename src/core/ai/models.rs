use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMessage {
    pub role: String,
    pub content: String,
}

impl AiMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Per-request knobs sent along with every completion.
///
/// `temperature` and `max_tokens` are left out of the request body when unset
/// so the provider's defaults apply.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Everything that can go wrong between sending a prompt and getting text back.
#[derive(Debug, Error)]
pub enum AiError {
    /// Non-success HTTP status from the completion endpoint.
    #[error("API error: {0}")]
    Status(u16),

    #[error("could not reach the completion API: {0}")]
    Transport(String),

    #[error("unexpected response from the completion API: {0}")]
    MalformedResponse(String),

    #[error("the completion API returned an empty reply")]
    EmptyReply,
}

/// Result of one reply generation.
///
/// Failures are values, not errors: the relay posts them to the channel like
/// any other reply so users can see that the API is misbehaving.
#[derive(Debug)]
pub enum ReplyOutcome {
    Success(String),
    Failure(AiError),
}

impl ReplyOutcome {
    /// Text to post in the channel, whichever way the call went.
    pub fn into_reply_text(self) -> String {
        match self {
            ReplyOutcome::Success(text) => text,
            ReplyOutcome::Failure(err) => format!("⚠️ {}", err),
        }
    }
}
