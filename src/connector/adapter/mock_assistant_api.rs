use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::application::{HttpMethod, HttpTransport, TransportFailure, TransportRequest, TransportResponse};

#[derive(Default)]
struct MockThread {
    /// Oldest first; reversed when listed.
    messages: Vec<(String, String)>,
    runs: HashMap<String, MockRun>,
}

struct MockRun {
    polls_left: u32,
    answered: bool,
}

/// Threads kept before the oldest is forgotten.
const DEFAULT_THREAD_LIMIT: usize = 256;
/// Calls kept in the call log.
const CALL_LOG_LIMIT: usize = 1024;

#[derive(Default)]
struct MockState {
    threads: HashMap<String, MockThread>,
    /// Thread ids, oldest first.
    created: VecDeque<String>,
    calls: VecDeque<(HttpMethod, String)>,
}

impl MockState {
    fn record(&mut self, method: HttpMethod, path: &str) {
        if self.calls.len() == CALL_LOG_LIMIT {
            self.calls.pop_front();
        }
        self.calls.push_back((method, path.to_string()));
    }

    fn open_thread(&mut self, id: String, limit: usize) {
        while self.created.len() >= limit.max(1) {
            if let Some(oldest) = self.created.pop_front() {
                self.threads.remove(&oldest);
            }
        }
        self.threads.insert(id.clone(), MockThread::default());
        self.created.push_back(id);
    }
}

/// In-process stand-in for the assistant thread API.
///
/// Threads and runs live in memory. A run reports `in_progress` for a
/// configurable number of polls, then `completed`, at which point an
/// assistant message echoing the latest user message is appended. Requests
/// without a bearer key are rejected with 401, unknown threads with 404.
///
/// Meant for demos and tests. Memory stays bounded under `serve --mock-api`:
/// past the thread limit the oldest thread is dropped, and only the most
/// recent calls are logged.
pub struct MockAssistantApi {
    pending_polls: u32,
    thread_limit: usize,
    state: Mutex<MockState>,
}

impl MockAssistantApi {
    pub fn new() -> Self {
        Self::with_pending_polls(1)
    }

    pub fn with_pending_polls(pending_polls: u32) -> Self {
        Self {
            pending_polls,
            thread_limit: DEFAULT_THREAD_LIMIT,
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn with_thread_limit(mut self, thread_limit: usize) -> Self {
        self.thread_limit = thread_limit;
        self
    }

    /// Recent calls, oldest first.
    pub fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.lock().calls.iter().cloned().collect()
    }

    pub fn thread_count(&self) -> usize {
        self.lock().threads.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply_to(message: &str) -> String {
        format!("You said: {message}")
    }

    fn handle(&self, request: &TransportRequest) -> (u16, Value) {
        let authorized = request
            .header("Authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|key| !key.trim().is_empty());
        if !authorized {
            return error(401, "invalid_request_error", "Incorrect API key provided.");
        }

        let mut state = self.lock();
        state.record(request.method, &request.path);

        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match (request.method, segments.as_slice()) {
            (HttpMethod::Post, ["threads"]) => {
                let id = format!("thread_{}", Uuid::new_v4().simple());
                state.open_thread(id.clone(), self.thread_limit);
                (200, json!({ "id": id, "object": "thread" }))
            }
            (HttpMethod::Post, ["threads", thread_id, "messages"]) => {
                let Some(thread) = state.threads.get_mut(*thread_id) else {
                    return no_thread(thread_id);
                };
                let content = request
                    .body
                    .as_ref()
                    .and_then(|b| b.get("content"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                thread.messages.push(("user".to_string(), content));
                (200, json!({ "object": "thread.message", "role": "user" }))
            }
            (HttpMethod::Post, ["threads", thread_id, "runs"]) => {
                let has_assistant = request
                    .body
                    .as_ref()
                    .and_then(|b| b.get("assistant_id"))
                    .and_then(Value::as_str)
                    .is_some_and(|id| !id.is_empty());
                if !has_assistant {
                    return error(400, "invalid_request_error", "Missing required parameter: 'assistant_id'.");
                }
                let pending_polls = self.pending_polls;
                let Some(thread) = state.threads.get_mut(*thread_id) else {
                    return no_thread(thread_id);
                };
                let id = format!("run_{}", Uuid::new_v4().simple());
                thread.runs.insert(
                    id.clone(),
                    MockRun {
                        polls_left: pending_polls,
                        answered: false,
                    },
                );
                (200, json!({ "id": id, "object": "thread.run", "status": "queued" }))
            }
            (HttpMethod::Get, ["threads", thread_id, "runs", run_id]) => {
                let Some(thread) = state.threads.get_mut(*thread_id) else {
                    return no_thread(thread_id);
                };
                let Some(run) = thread.runs.get_mut(*run_id) else {
                    return error(404, "invalid_request_error", &format!("No run found with id '{run_id}'."));
                };
                if run.polls_left > 0 {
                    run.polls_left -= 1;
                    return (200, json!({ "id": run_id, "status": "in_progress" }));
                }
                if !run.answered {
                    run.answered = true;
                    let last_user = thread
                        .messages
                        .iter()
                        .rev()
                        .find(|(role, _)| role == "user")
                        .map(|(_, text)| text.clone())
                        .unwrap_or_default();
                    thread
                        .messages
                        .push(("assistant".to_string(), Self::reply_to(&last_user)));
                }
                (200, json!({ "id": run_id, "status": "completed", "last_error": null }))
            }
            (HttpMethod::Get, ["threads", thread_id, "messages"]) => {
                let Some(thread) = state.threads.get(*thread_id) else {
                    return no_thread(thread_id);
                };
                let data: Vec<Value> = thread
                    .messages
                    .iter()
                    .rev()
                    .map(|(role, text)| {
                        json!({
                            "role": role,
                            "content": [{ "type": "text", "text": { "value": text, "annotations": [] } }]
                        })
                    })
                    .collect();
                (200, json!({ "object": "list", "data": data }))
            }
            (HttpMethod::Get, ["assistants", assistant_id]) => (
                200,
                json!({ "id": assistant_id, "name": "Mock Assistant", "model": "mock-model" }),
            ),
            _ => error(404, "invalid_request_error", "Unknown request URL."),
        }
    }
}

impl Default for MockAssistantApi {
    fn default() -> Self {
        Self::new()
    }
}

fn error(status: u16, kind: &str, message: &str) -> (u16, Value) {
    (status, json!({ "error": { "message": message, "type": kind } }))
}

fn no_thread(thread_id: &str) -> (u16, Value) {
    error(404, "invalid_request_error", &format!("No thread found with id '{thread_id}'."))
}

#[async_trait]
impl HttpTransport for MockAssistantApi {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
        let (status, body) = self.handle(&request);
        debug!("Mock assistant API {} {} -> {}", request.method, request.path, status);
        Ok(TransportResponse::new(status, body.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ConversationRelay;
    use crate::connector::adapter::NoopSleeper;
    use crate::domain::{ConversationHandle, RelayConfig};

    fn relay(api: Arc<MockAssistantApi>) -> ConversationRelay {
        ConversationRelay::new(
            RelayConfig::new("sk-mock", "asst_mock"),
            api,
            Arc::new(NoopSleeper),
        )
    }

    #[tokio::test]
    async fn full_turn_against_mock() {
        let api = Arc::new(MockAssistantApi::with_pending_polls(2));
        let result = relay(api.clone()).process_message("Hello", None).await.unwrap();

        assert_eq!(result.reply_text(), "You said: Hello");
        assert!(result.conversation_handle().as_str().starts_with("thread_"));
        assert_eq!(api.thread_count(), 1);

        let polls = api
            .calls()
            .iter()
            .filter(|(method, path)| *method == HttpMethod::Get && path.contains("/runs/"))
            .count();
        assert_eq!(polls, 3);
    }

    #[tokio::test]
    async fn second_turn_reuses_thread() {
        let api = Arc::new(MockAssistantApi::new());
        let relay = relay(api.clone());

        let first = relay.process_message("one", None).await.unwrap();
        let second = relay
            .process_message("two", Some(first.conversation_handle().clone()))
            .await
            .unwrap();

        assert_eq!(second.conversation_handle(), first.conversation_handle());
        assert_eq!(second.reply_text(), "You said: two");
        assert_eq!(api.thread_count(), 1);
    }

    #[tokio::test]
    async fn unknown_thread_is_rejected() {
        let api = Arc::new(MockAssistantApi::new());
        let err = relay(api)
            .process_message("hi", Some(ConversationHandle::new("thread_gone")))
            .await
            .unwrap_err();

        assert!(err.is_remote_rejection());
        assert_eq!(
            err.to_string(),
            "Assistant API error when adding message (code 404): No thread found with id 'thread_gone'."
        );
    }

    #[tokio::test]
    async fn oldest_thread_is_forgotten_past_the_limit() {
        let api = Arc::new(MockAssistantApi::with_pending_polls(0).with_thread_limit(2));
        let relay = relay(api.clone());

        let first = relay.process_message("one", None).await.unwrap();
        relay.process_message("two", None).await.unwrap();
        relay.process_message("three", None).await.unwrap();

        assert_eq!(api.thread_count(), 2);
        let err = relay
            .process_message("again", Some(first.conversation_handle().clone()))
            .await
            .unwrap_err();
        assert!(err.is_remote_rejection());
    }

    #[tokio::test]
    async fn call_log_keeps_only_recent_calls() {
        let api = Arc::new(MockAssistantApi::with_pending_polls(0));
        let relay = relay(api.clone());
        let thread = relay.process_message("hi", None).await.unwrap();
        let handle = thread.conversation_handle().clone();

        // Four calls per continued turn.
        for _ in 0..(CALL_LOG_LIMIT / 4 + 1) {
            relay.process_message("more", Some(handle.clone())).await.unwrap();
        }

        let calls = api.calls();
        assert_eq!(calls.len(), CALL_LOG_LIMIT);
        assert_eq!(calls.last().unwrap().0, HttpMethod::Get);
    }
}
