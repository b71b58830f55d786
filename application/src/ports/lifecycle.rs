//! Lifecycle notification port
//!
//! Defines the interface for observing session lifecycle events. There is
//! no implicit global dispatcher: callers register an observer explicitly
//! per `execute_with_observer` call, and events are delivered synchronously
//! from within the orchestrator.

use foreman_domain::{PlannerResult, SessionId};
use std::time::Duration;

/// Payload of the `start` notification.
#[derive(Debug, Clone)]
pub struct SessionStarted {
    pub session_id: SessionId,
    pub input: String,
}

/// Payload of the `error` notification.
#[derive(Debug, Clone)]
pub struct SessionFailed {
    pub session_id: SessionId,
    pub message: String,
    /// Elapsed wall-clock time at the point of failure.
    pub duration: Duration,
}

/// Callback for session lifecycle events.
///
/// Implementations live in the infrastructure or presentation layers and
/// can forward events anywhere (log sink, channel, UI).
pub trait LifecycleObserver: Send + Sync {
    /// Called once before the first phase runs.
    fn on_start(&self, event: &SessionStarted);

    /// Called with the terminal result after finalization.
    fn on_complete(&self, result: &PlannerResult);

    /// Called when a session aborts; no result record exists.
    fn on_error(&self, event: &SessionFailed);
}

/// No-op observer for when lifecycle reporting is not needed.
pub struct NoLifecycle;

impl LifecycleObserver for NoLifecycle {
    fn on_start(&self, _event: &SessionStarted) {}
    fn on_complete(&self, _result: &PlannerResult) {}
    fn on_error(&self, _event: &SessionFailed) {}
}
