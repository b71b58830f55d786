//! Infrastructure layer for agent-foreman
//!
//! Adapters for the application-layer ports: the tokio-backed jittered
//! thinking pacer, lifecycle observers (tracing, JSONL file), and the
//! figment-based configuration loader.

pub mod config;
pub mod logging;
pub mod pacing;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::{CompositeObserver, JsonlLifecycleLogger, TracingLifecycleObserver};
pub use pacing::JitteredThinkingPacer;
