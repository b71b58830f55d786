//! Lifecycle observer that forwards events to `tracing`.

use foreman_application::{LifecycleObserver, SessionFailed, SessionStarted};
use foreman_domain::PlannerResult;
use foreman_domain::util::ellipsize;
use tracing::{error, info};

/// Forwards lifecycle notifications to the active tracing subscriber.
///
/// The default observer for CLI runs; composes with
/// [`JsonlLifecycleLogger`](super::JsonlLifecycleLogger) via
/// [`CompositeObserver`](super::CompositeObserver) when a log file is
/// configured.
pub struct TracingLifecycleObserver;

impl LifecycleObserver for TracingLifecycleObserver {
    fn on_start(&self, event: &SessionStarted) {
        info!(
            session = event.session_id.as_str(),
            "planning '{}'",
            ellipsize(&event.input, 120)
        );
    }

    fn on_complete(&self, result: &PlannerResult) {
        info!(
            session = result.id.as_str(),
            status = result.status.as_str(),
            actions = result.actions.len(),
            errors = result.errors.len(),
            confidence = result.confidence,
            duration_ms = result.duration_ms,
            "planning complete"
        );
    }

    fn on_error(&self, event: &SessionFailed) {
        error!(
            session = event.session_id.as_str(),
            duration_ms = event.duration.as_millis() as u64,
            "planning failed: {}",
            event.message
        );
    }
}

/// Fans one lifecycle event out to several observers, in order.
pub struct CompositeObserver {
    observers: Vec<Box<dyn LifecycleObserver>>,
}

impl CompositeObserver {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn with(mut self, observer: Box<dyn LifecycleObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl Default for CompositeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleObserver for CompositeObserver {
    fn on_start(&self, event: &SessionStarted) {
        for observer in &self.observers {
            observer.on_start(event);
        }
    }

    fn on_complete(&self, result: &PlannerResult) {
        for observer in &self.observers {
            observer.on_complete(result);
        }
    }

    fn on_error(&self, event: &SessionFailed) {
        for observer in &self.observers {
            observer.on_error(event);
        }
    }
}
