use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{AssistantSummary, RelayError, RelayResult};

/// Body of `POST /chat`, accepted as JSON or as a urlencoded form.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// Visitor's message; sanitized before it reaches the relay.
    #[serde(default)]
    pub message: String,

    /// Thread id returned by a previous turn; empty on the first turn.
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Response envelope shared by every endpoint and the CLI `--json` output.
///
/// Failures are reported inside the envelope with HTTP 200 so the chat widget
/// can render them as an inline error bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub data: Value,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: json!({ "message": message.into() }),
        }
    }

    pub fn from_error(err: &RelayError) -> Self {
        Self {
            success: false,
            data: json!({ "message": err.to_string(), "kind": err.kind() }),
        }
    }

    pub fn from_reply(result: Result<RelayResult, RelayError>) -> Self {
        match result {
            Ok(reply) => Self::success(json!({
                "thread_id": reply.conversation_handle(),
                "message": reply.reply_text(),
            })),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn from_validation(result: Result<AssistantSummary, RelayError>) -> Self {
        match result {
            Ok(summary) => Self::success(json!(summary)),
            Err(e) => Self::from_error(&e),
        }
    }
}
