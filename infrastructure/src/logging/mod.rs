//! Logging infrastructure — lifecycle observers.
//!
//! [`TracingLifecycleObserver`] forwards events to the tracing
//! subscriber; [`JsonlLifecycleLogger`] appends them to a JSONL file;
//! [`CompositeObserver`] fans out to both.

mod jsonl_logger;
mod tracing_observer;

pub use jsonl_logger::JsonlLifecycleLogger;
pub use tracing_observer::{CompositeObserver, TracingLifecycleObserver};
