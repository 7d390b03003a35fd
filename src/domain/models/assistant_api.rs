//! Wire shapes of the assistant thread API.
//!
//! Only the fields the relay reads are modelled; everything else in the
//! remote payloads is ignored. Every field is defaulted so a sparse but valid
//! JSON object still deserializes and the relay can report what is missing.

use serde::Deserialize;

const UNKNOWN_API_ERROR: &str = "Unknown API error.";

/// `POST /threads` and `POST /threads/{id}/runs` responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectRef {
    #[serde(default)]
    pub id: Option<String>,
}

/// `GET /threads/{id}/runs/{run_id}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_error: Option<RunLastError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunLastError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /threads/{id}/messages` response, newest message first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub data: Option<Vec<ThreadMessage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub value: String,
}

/// `GET /assistants/{id}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Outcome of a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AssistantSummary {
    pub id: String,
    pub name: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Pull a displayable message out of a rejected response body.
///
/// Prefers `error.message`, then `error.type`. Anything unparseable yields a
/// generic message; this never fails.
pub fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| {
            detail
                .message
                .filter(|m| !m.is_empty())
                .or(detail.kind.filter(|t| !t.is_empty()))
        })
        .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string())
}

/// Reply text of the newest assistant message.
///
/// The list is newest-first, so the first assistant entry wins. Its text
/// segments are joined with blank lines and trimmed. Returns `None` when no
/// assistant entry exists or its text is empty.
pub fn extract_reply(messages: &[ThreadMessage]) -> Option<String> {
    let latest = messages.iter().find(|m| m.role == "assistant")?;

    let mut reply = String::new();
    for part in latest.content.iter().filter(|p| p.kind == "text") {
        if let Some(text) = &part.text {
            reply.push_str(&text.value);
            reply.push_str("\n\n");
        }
    }

    let reply = reply.trim();
    if reply.is_empty() {
        None
    } else {
        Some(reply.to_string())
    }
}
