use serde::{Deserialize, Serialize};

/// Server-issued identifier of a remote conversation ("thread").
///
/// The relay never generates or inspects it. Callers persist it between turns
/// and hand it back to continue the same conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHandle(String);

impl ConversationHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Treats a blank id as "no conversation yet", the way chat widgets post
    /// an empty hidden field on the first turn.
    pub fn from_optional(id: Option<&str>) -> Option<Self> {
        id.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ConversationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one processing run inside a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    id: String,
    conversation: ConversationHandle,
}

impl RunHandle {
    pub fn new(id: impl Into<String>, conversation: ConversationHandle) -> Self {
        Self {
            id: id.into(),
            conversation,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn conversation(&self) -> &ConversationHandle {
        &self.conversation
    }
}

/// Successful outcome of one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResult {
    #[serde(rename = "thread_id")]
    conversation_handle: ConversationHandle,
    #[serde(rename = "message")]
    reply_text: String,
}

impl RelayResult {
    pub fn new(conversation_handle: ConversationHandle, reply_text: impl Into<String>) -> Self {
        Self {
            conversation_handle,
            reply_text: reply_text.into(),
        }
    }

    pub fn conversation_handle(&self) -> &ConversationHandle {
        &self.conversation_handle
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_handle_is_absent() {
        assert_eq!(ConversationHandle::from_optional(None), None);
        assert_eq!(ConversationHandle::from_optional(Some("  ")), None);
        assert_eq!(
            ConversationHandle::from_optional(Some("thread_abc")),
            Some(ConversationHandle::new("thread_abc"))
        );
    }

    #[test]
    fn result_uses_widget_field_names() {
        let result = RelayResult::new(ConversationHandle::new("t1"), "Hi there!");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"thread_id": "t1", "message": "Hi there!"}));
    }
}
