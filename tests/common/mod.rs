//! Test doubles shared by the integration suites.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use chatrelay::{
    ConversationRelay, HttpMethod, HttpTransport, RelayConfig, Sleeper, TransportFailure,
    TransportRequest, TransportResponse,
};

type Outcome = Result<TransportResponse, TransportFailure>;

/// Transport answering from per-route scripts and recording every request.
///
/// Each route replays its outcomes in order; the last one repeats once the
/// script runs dry. Unscripted routes fail as network errors.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<Outcome>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: HttpMethod, path: &str, status: u16, body: Value) -> Self {
        self.push(method, path, Ok(TransportResponse::new(status, body.to_string())))
    }

    pub fn on_raw(self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        self.push(method, path, Ok(TransportResponse::new(status, body)))
    }

    pub fn fail(self, method: HttpMethod, path: &str, failure: TransportFailure) -> Self {
        self.push(method, path, Err(failure))
    }

    fn push(self, method: HttpMethod, path: &str, outcome: Outcome) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(outcome);
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `"METHOD /path"` for every request, in order.
    pub fn call_log(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: TransportRequest) -> Outcome {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(TransportFailure::Network("empty script".into()))),
            None => Err(TransportFailure::Network(format!(
                "unscripted request {} {}",
                key.0, key.1
            ))),
        }
    }
}

/// Sleeper that records requested waits and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

pub fn test_config() -> RelayConfig {
    RelayConfig::new("sk-test", "asst_test")
}

pub fn relay_with(
    config: RelayConfig,
    transport: Arc<ScriptedTransport>,
    sleeper: Arc<RecordingSleeper>,
) -> ConversationRelay {
    ConversationRelay::new(config, transport, sleeper)
}

pub fn run_status(status: &str) -> Value {
    json!({ "id": "r1", "object": "thread.run", "status": status })
}

pub fn assistant_messages(texts: &[&str]) -> Value {
    let data: Vec<Value> = texts
        .iter()
        .map(|text| {
            json!({
                "role": "assistant",
                "content": [{ "type": "text", "text": { "value": text, "annotations": [] } }]
            })
        })
        .collect();
    json!({ "object": "list", "data": data })
}
