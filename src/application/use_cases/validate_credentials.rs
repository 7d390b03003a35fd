use std::sync::Arc;

use tracing::info;

use crate::application::use_cases::api_call::{call_api, decode, path_segment, ApiStep};
use crate::application::{HttpTransport, TransportRequest};
use crate::domain::{AssistantObject, AssistantSummary, RelayConfig, RelayError};

/// Checks that the configured key can read the configured assistant.
///
/// Used for configuration diagnostics only; it is independent of any
/// conversation turn.
pub struct ValidateCredentialsUseCase {
    config: RelayConfig,
    transport: Arc<dyn HttpTransport>,
}

impl ValidateCredentialsUseCase {
    pub fn new(config: RelayConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub async fn execute(&self) -> Result<AssistantSummary, RelayError> {
        if self.config.api_key().trim().is_empty() || self.config.assistant_id().trim().is_empty() {
            return Err(RelayError::configuration(
                "API key and Assistant ID are required.",
            ));
        }

        let assistant_id = self.config.assistant_id();
        let body = call_api(
            self.transport.as_ref(),
            &self.config,
            ApiStep::RetrieveAssistant,
            TransportRequest::get(
                format!("/assistants/{}", path_segment(assistant_id)),
                self.config.validation_timeout(),
            ),
        )
        .await?;

        let assistant: AssistantObject = decode(body, "assistant").unwrap_or_default();
        let summary = AssistantSummary {
            id: assistant.id.unwrap_or_else(|| assistant_id.to_string()),
            name: assistant.name,
            model: assistant.model,
        };

        info!("Credentials valid for assistant {}", summary.id);
        Ok(summary)
    }
}
