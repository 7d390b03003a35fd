use std::time::Duration;

use async_trait::async_trait;

use crate::application::Sleeper;

/// [`Sleeper`] on the tokio timer; yields the task instead of blocking.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl TokioSleeper {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// [`Sleeper`] that returns immediately. Used with the mock assistant API,
/// where there is nothing to wait for.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSleeper;

#[async_trait]
impl Sleeper for NoopSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
