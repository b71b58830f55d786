//! Tokio-backed thinking pacer with pseudo-random jitter.

use async_trait::async_trait;
use foreman_application::ThinkingPacer;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::trace;

/// Production pacer: sleeps for a uniformly random duration between a
/// small floor and the effort level's ceiling.
///
/// The pause is a cooperative yield, not work; it paces external-facing
/// behavior only. A zero ceiling skips the sleep entirely.
pub struct JitteredThinkingPacer {
    /// Minimum pause, so a pause never reads as instantaneous.
    floor: Duration,
}

impl JitteredThinkingPacer {
    pub fn new() -> Self {
        Self {
            floor: Duration::from_millis(50),
        }
    }

    pub fn with_floor(mut self, floor: Duration) -> Self {
        self.floor = floor;
        self
    }
}

impl Default for JitteredThinkingPacer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThinkingPacer for JitteredThinkingPacer {
    async fn pause(&self, ceiling: Duration) {
        if ceiling.is_zero() {
            return;
        }
        let floor = self.floor.min(ceiling);
        let millis = rand::thread_rng().gen_range(floor.as_millis()..=ceiling.as_millis()) as u64;
        trace!(millis, "thinking pause");
        sleep(Duration::from_millis(millis)).await;
    }
}
