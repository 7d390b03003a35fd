use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::use_cases::api_call::{call_api, decode, path_segment, ApiStep};
use crate::application::{HttpTransport, Sleeper, TransportRequest};
use crate::domain::{
    extract_reply, ConversationHandle, MessageList, ObjectRef, RelayConfig, RelayError,
    RelayResult, RunHandle, RunLastError, RunObject, RunState,
};

/// Turns one visitor message into one assistant reply.
///
/// A turn is strictly sequential: ensure a thread exists, post the message,
/// start a run, poll it to a terminal state, then read back the newest
/// assistant message. The first failing step ends the turn; the relay never
/// retries a turn on its own.
///
/// The relay holds no per-conversation state, so one instance can serve
/// concurrent turns for different threads. Turns against the same thread are
/// not coordinated here.
pub struct ConversationRelay {
    config: RelayConfig,
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
}

impl ConversationRelay {
    pub fn new(
        config: RelayConfig,
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            config,
            transport,
            sleeper,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub async fn process_message(
        &self,
        message: &str,
        conversation: Option<ConversationHandle>,
    ) -> Result<RelayResult, RelayError> {
        self.config.ensure_credentials()?;
        if message.trim().is_empty() {
            return Err(RelayError::invalid_input("Empty message."));
        }

        let conversation = conversation.filter(|thread| !thread.as_str().trim().is_empty());
        if conversation
            .as_ref()
            .is_some_and(|thread| is_dot_segment(thread.as_str()))
        {
            return Err(RelayError::invalid_input("Invalid conversation handle."));
        }

        let start_time = Instant::now();

        let thread = match conversation {
            Some(thread) => thread,
            None => self.create_thread().await?,
        };

        self.add_message(&thread, message).await?;
        let run = self.start_run(&thread).await?;
        self.await_completion(&run).await?;
        let reply = self.fetch_reply(&thread).await?;

        info!(
            "Assistant replied on thread {} in {:.2}s",
            thread,
            start_time.elapsed().as_secs_f64()
        );

        Ok(RelayResult::new(thread, reply))
    }

    async fn call(&self, step: ApiStep, request: TransportRequest) -> Result<serde_json::Value, RelayError> {
        call_api(self.transport.as_ref(), &self.config, step, request).await
    }

    async fn create_thread(&self) -> Result<ConversationHandle, RelayError> {
        info!("Creating new thread");

        let body = self
            .call(
                ApiStep::CreateThread,
                TransportRequest::post("/threads", json!({}), self.config.request_timeout()),
            )
            .await?;

        let id = decode::<ObjectRef>(body, "thread")?
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                RelayError::processing("Failed to create thread: no thread ID returned.")
            })?;

        info!("Thread created with ID: {}", id);
        Ok(ConversationHandle::new(id))
    }

    async fn add_message(&self, thread: &ConversationHandle, message: &str) -> Result<(), RelayError> {
        debug!("Adding message to thread {}", thread);

        self.call(
            ApiStep::AddMessage,
            TransportRequest::post(
                format!("/threads/{}/messages", path_segment(thread.as_str())),
                json!({ "role": "user", "content": message }),
                self.config.request_timeout(),
            ),
        )
        .await?;

        Ok(())
    }

    async fn start_run(&self, thread: &ConversationHandle) -> Result<RunHandle, RelayError> {
        debug!(
            "Running assistant {} on thread {}",
            self.config.assistant_id(),
            thread
        );

        let body = self
            .call(
                ApiStep::CreateRun,
                TransportRequest::post(
                    format!("/threads/{}/runs", path_segment(thread.as_str())),
                    json!({ "assistant_id": self.config.assistant_id() }),
                    self.config.request_timeout(),
                ),
            )
            .await?;

        let id = decode::<ObjectRef>(body, "run")?
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| RelayError::processing("Failed to create run: no run ID returned."))?;

        debug!("Run created with ID: {}", id);
        Ok(RunHandle::new(id, thread.clone()))
    }

    /// Poll until the run leaves `Pending` or the attempt budget runs out.
    async fn await_completion(&self, run: &RunHandle) -> Result<(), RelayError> {
        let policy = self.config.poll();
        let path = format!(
            "/threads/{}/runs/{}",
            path_segment(run.conversation().as_str()),
            path_segment(run.id())
        );
        let mut last_status = String::from("queued");

        for attempt in 1..=policy.max_attempts() {
            self.sleeper.sleep(policy.delay_for(attempt)).await;

            debug!("Checking run status (attempt {})", attempt);
            let body = self
                .call(
                    ApiStep::CheckRunStatus,
                    TransportRequest::get(path.as_str(), self.config.request_timeout()),
                )
                .await?;

            let RunObject {
                status, last_error, ..
            } = decode(body, "run status")?;
            let status = status.ok_or_else(|| {
                RelayError::processing(
                    "Failed to retrieve run status: invalid response from assistant API.",
                )
            })?;

            let state = RunState::from_status(&status);
            debug!("Current run status: {} ({})", status, state);

            match state {
                RunState::Pending => last_status = status,
                RunState::Completed => return Ok(()),
                RunState::Failed => return Err(run_failed(last_error)),
                RunState::Cancelled | RunState::Expired => {
                    warn!("Run {} ended with status {}", run.id(), state);
                    return Err(RelayError::processing(format!(
                        "Assistant processing completed with unexpected status: {state}"
                    )));
                }
            }
        }

        warn!(
            "Run {} timed out after {} attempts. Last status: {}",
            run.id(),
            policy.max_attempts(),
            last_status
        );
        Err(RelayError::timeout(
            "The request timed out waiting for the assistant to process your message. Please try again.",
        ))
    }

    async fn fetch_reply(&self, thread: &ConversationHandle) -> Result<String, RelayError> {
        debug!("Run completed. Retrieving messages from thread {}", thread);

        let body = self
            .call(
                ApiStep::ListMessages,
                TransportRequest::get(
                    format!("/threads/{}/messages", path_segment(thread.as_str())),
                    self.config.request_timeout(),
                ),
            )
            .await?;

        let messages = decode::<MessageList>(body, "messages")?
            .data
            .ok_or_else(|| {
                RelayError::processing(
                    "Failed to retrieve messages: invalid response format from assistant API.",
                )
            })?;

        extract_reply(&messages).ok_or_else(|| {
            warn!(
                "No assistant message found among {} messages on thread {}",
                messages.len(),
                thread
            );
            RelayError::processing("No response received from the assistant.")
        })
    }
}

/// `.` and `..` survive percent-encoding and would be resolved as relative
/// segments by the URL parser.
fn is_dot_segment(id: &str) -> bool {
    matches!(id, "." | "..")
}

fn run_failed(last_error: Option<RunLastError>) -> RelayError {
    match last_error {
        Some(error) => {
            let code = error.code.unwrap_or_else(|| "unknown".to_string());
            let message = error.message.unwrap_or_else(|| "Unknown error".to_string());
            warn!("Run failed with error code {}: {}", code, message);
            RelayError::processing(format!("Assistant processing error ({code}): {message}"))
        }
        None => {
            warn!("Run failed without specific error details");
            RelayError::processing("Assistant processing failed without specific error details.")
        }
    }
}
