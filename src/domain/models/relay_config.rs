use std::time::Duration;

use crate::domain::RelayError;

/// Default target: the hosted assistant thread API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Timeout for every call made during a conversation turn.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Timeout for the credential check.
pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Linear backoff for run polling: attempt `n` waits `min(step * n, cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_attempts: u32,
    step: Duration,
    cap: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, step: Duration, cap: Duration) -> Self {
        Self {
            max_attempts,
            step,
            cap,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before poll `attempt` (1-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt).min(self.cap)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(30, Duration::from_secs(2), Duration::from_secs(10))
    }
}

/// Credentials and tuning for a [`crate::ConversationRelay`].
#[derive(Clone)]
pub struct RelayConfig {
    api_key: String,
    assistant_id: String,
    base_url: String,
    request_timeout: Duration,
    validation_timeout: Duration,
    poll: PollPolicy,
}

impl RelayConfig {
    pub fn new(api_key: impl Into<String>, assistant_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            assistant_id: assistant_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
            poll: PollPolicy::default(),
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable              | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `OPENAI_API_KEY`      | `""` (relay refuses to run) |
    /// | `OPENAI_ASSISTANT_ID` | `""` (relay refuses to run) |
    /// | `OPENAI_BASE_URL`     | `https://api.openai.com/v1` |
    pub fn from_env() -> Self {
        let key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let assistant = std::env::var("OPENAI_ASSISTANT_ID").unwrap_or_default();
        let base = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(key, assistant).with_base_url(base)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = assistant_id.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_validation_timeout(mut self, timeout: Duration) -> Self {
        self.validation_timeout = timeout;
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn validation_timeout(&self) -> Duration {
        self.validation_timeout
    }

    pub fn poll(&self) -> PollPolicy {
        self.poll
    }

    /// Fails when either credential is blank.
    pub fn ensure_credentials(&self) -> Result<(), RelayError> {
        if self.api_key.trim().is_empty() {
            return Err(RelayError::configuration("API key is not configured."));
        }
        if self.assistant_id.trim().is_empty() {
            return Err(RelayError::configuration("Assistant ID is not configured."));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("assistant_id", &self.assistant_id)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("validation_timeout", &self.validation_timeout)
            .field("poll", &self.poll)
            .finish()
    }
}
