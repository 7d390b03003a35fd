use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{HttpTransport, TransportRequest};
use crate::domain::{rejection_message, RelayConfig, RelayError};

/// Marker required by the assistant thread API on every request.
pub const API_VERSION_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Remote calls the relay makes; used for log lines and error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStep {
    CreateThread,
    AddMessage,
    CreateRun,
    CheckRunStatus,
    ListMessages,
    RetrieveAssistant,
}

impl ApiStep {
    pub fn describe(&self) -> &'static str {
        match self {
            ApiStep::CreateThread => "creating thread",
            ApiStep::AddMessage => "adding message",
            ApiStep::CreateRun => "creating run",
            ApiStep::CheckRunStatus => "checking run status",
            ApiStep::ListMessages => "retrieving messages",
            ApiStep::RetrieveAssistant => "retrieving assistant",
        }
    }

    fn transport_failure_prefix(&self) -> &'static str {
        match self {
            ApiStep::CreateThread => "Failed to connect to assistant API",
            ApiStep::AddMessage => "Failed to send message to assistant API",
            ApiStep::CreateRun => "Failed to start assistant processing",
            ApiStep::CheckRunStatus => "Failed to check assistant processing status",
            ApiStep::ListMessages => "Failed to retrieve assistant response",
            ApiStep::RetrieveAssistant => "Failed to reach assistant API",
        }
    }

    fn rejection_context(&self) -> &'static str {
        match self {
            ApiStep::CreateThread => "",
            ApiStep::AddMessage => " when adding message",
            ApiStep::CreateRun => " when creating run",
            ApiStep::CheckRunStatus => " when checking status",
            ApiStep::ListMessages => " when retrieving messages",
            ApiStep::RetrieveAssistant => " when validating credentials",
        }
    }
}

/// Execute one authenticated call and apply the shared response policy.
///
/// No response at all becomes [`RelayError::Transport`]; any status other than
/// 200 becomes [`RelayError::RemoteRejection`] with the message found in the
/// body's `error` object. A 200 body that is not JSON yields `Value::Null`, so
/// callers report the missing field rather than a parse failure.
pub async fn call_api(
    transport: &dyn HttpTransport,
    config: &RelayConfig,
    step: ApiStep,
    request: TransportRequest,
) -> Result<Value, RelayError> {
    let request = request
        .with_header("Authorization", format!("Bearer {}", config.api_key()))
        .with_header("Content-Type", "application/json")
        .with_header(API_VERSION_HEADER.0, API_VERSION_HEADER.1);

    debug!("{} {} ({})", request.method, request.path, step.describe());

    let response = match transport.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Transport failure when {}: {}", step.describe(), e);
            return Err(RelayError::transport(format!(
                "{}: {}",
                step.transport_failure_prefix(),
                e
            )));
        }
    };

    if response.status != 200 {
        warn!(
            "HTTP error when {}. Status: {}, Response: {}",
            step.describe(),
            response.status,
            response.body
        );
        return Err(RelayError::remote_rejection(
            response.status,
            format!(
                "Assistant API error{} (code {}): {}",
                step.rejection_context(),
                response.status,
                rejection_message(&response.body)
            ),
        ));
    }

    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!("Response body when {} is not JSON: {}", step.describe(), e);
            Ok(Value::Null)
        }
    }
}

/// Deserialize a successful body, reporting a malformed one as a processing
/// failure described by `what`.
pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, RelayError> {
    serde_json::from_value(value).map_err(|e| {
        warn!("Invalid {} payload: {}", what, e);
        RelayError::processing(format!(
            "Failed to read {what}: invalid response from assistant API."
        ))
    })
}

/// Percent-encode a remote id so it fills exactly one path segment.
pub fn path_segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
