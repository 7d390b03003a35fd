use anyhow::{bail, Result};

use crate::connector::adapter::http::Envelope;
use crate::{sanitize_text_field, ConversationHandle, RelayResult};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, message: String, thread: Option<String>, json: bool) -> Result<String> {
        let message = sanitize_text_field(&message);
        if message.is_empty() {
            bail!("Empty message.");
        }
        let thread = ConversationHandle::from_optional(thread.as_deref());

        let result = self.container.relay().process_message(&message, thread).await;

        if json {
            return Ok(serde_json::to_string_pretty(&Envelope::from_reply(result))?);
        }

        match result {
            Ok(reply) => Ok(self.format_reply(&reply)),
            Err(e) => bail!("{} error: {}", e.kind(), e),
        }
    }

    fn format_reply(&self, reply: &RelayResult) -> String {
        format!(
            "{}\n\nThread: {}",
            reply.reply_text(),
            reply.conversation_handle()
        )
    }
}
