//! Pacing adapters — implementations of the
//! [`ThinkingPacer`](foreman_application::ThinkingPacer) port.

mod jittered;

pub use jittered::JitteredThinkingPacer;
