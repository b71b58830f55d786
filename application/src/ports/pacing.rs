//! Thinking pacer port
//!
//! The planner pauses cooperatively before plan and reflection generation
//! to pace its external-facing behavior. The delay is an injected
//! abstraction so tests run with zero delay deterministically; the
//! production adapter sleeps for a pseudo-random duration bounded by the
//! effort level's ceiling.

use async_trait::async_trait;
use std::time::Duration;

/// Cooperative pause taken before plan and reflection generation.
#[async_trait]
pub trait ThinkingPacer: Send + Sync {
    /// Suspends for an implementation-chosen delay, at most `ceiling`.
    async fn pause(&self, ceiling: Duration);
}

/// No-op pacer; used by tests and anywhere pacing is unwanted.
pub struct NoPacing;

#[async_trait]
impl ThinkingPacer for NoPacing {
    async fn pause(&self, _ceiling: Duration) {}
}
