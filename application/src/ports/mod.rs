//! Ports - interfaces implemented by the infrastructure layer.

pub mod lifecycle;
pub mod pacing;

pub use lifecycle::{LifecycleObserver, NoLifecycle, SessionFailed, SessionStarted};
pub use pacing::{NoPacing, ThinkingPacer};
