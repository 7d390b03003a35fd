use std::time::Duration;

use async_trait::async_trait;

/// Waits between run polls.
///
/// Production code uses the tokio timer; tests inject a recorder so the
/// backoff schedule can be asserted without wall-clock delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
