//! Terminal result record for a planning session.
//!
//! [`PlannerResult`] is the archival, fully serializable record handed
//! back to the caller (and to lifecycle observers) when a session runs to
//! completion. The derived metrics on it are computed by the application
//! layer's finalizer.

use super::entities::{SessionStatus, ValidationFailure};
use crate::complexity::ComplexityReport;
use crate::config::{EffortLevel, EffortProfile};
use crate::planning::entities::{Action, Plan};
use crate::planning::value_objects::SessionId;
use crate::reflection::Reflection;
use serde::{Deserialize, Serialize};

/// Provenance metadata stamped onto every result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// RFC 3339 completion timestamp.
    pub timestamp: String,
    /// Planner crate version that produced the result.
    pub version: String,
    /// Snapshot of the effort profile the session ran under.
    pub profile: EffortProfile,
    pub enable_reflection: bool,
    pub enable_planning: bool,
}

/// The terminal record of one `process` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerResult {
    pub id: SessionId,
    pub input: String,
    pub effort: EffortLevel,
    pub complexity: Option<ComplexityReport>,
    pub plan: Option<Plan>,
    pub actions: Vec<Action>,
    pub reflections: Vec<Reflection>,
    pub errors: Vec<ValidationFailure>,
    /// Final iteration counter value.
    pub iterations: u32,
    /// Wall-clock duration of the whole invocation.
    pub duration_ms: u64,
    /// Heuristic token estimate for the session.
    pub tokens_used: u64,
    /// Overall confidence in the produced action list, in `[0.1, 1.0]`.
    pub confidence: f64,
    pub status: SessionStatus,
    pub metadata: RunMetadata,
}

impl PlannerResult {
    pub fn is_success(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::Completed | SessionStatus::CompletedWithErrors
        )
    }
}
