//! Effort levels — named configuration bundles for planning depth and
//! pacing.
//!
//! The effort table is immutable and shared by all sessions; the active
//! planner configuration built from it lives in the application layer.

pub mod effort;

pub use effort::{EffortLevel, EffortProfile};
