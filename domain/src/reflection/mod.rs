//! Reflection domain types
//!
//! A [`Reflection`] records a post-execution self-assessment of the
//! session; [`Adjustment`] is the corrective operation a reflection may
//! propose against the session's action list. The heuristics that produce
//! them live in the application layer.

use crate::planning::entities::{Action, ActionPatch};
use crate::planning::value_objects::{ActionId, ReflectionId, current_timestamp_ms};
use serde::{Deserialize, Serialize};

/// Overall verdict of a reflection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Positive,
    NeedsAttention,
}

impl Assessment {
    pub fn as_str(&self) -> &str {
        match self {
            Assessment::Positive => "positive",
            Assessment::NeedsAttention => "needs_attention",
        }
    }
}

impl std::fmt::Display for Assessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A self-assessment of accumulated session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reflection {
    pub id: ReflectionId,
    /// Creation timestamp in milliseconds.
    pub timestamp: u64,
    pub assessment: Assessment,
    /// Confidence in the current action list, in `[0, 1]`.
    pub confidence: f64,
    pub observations: Vec<String>,
    pub recommendations: Vec<String>,
    /// Whether adjustments should be generated and applied.
    pub needs_adjustment: bool,
}

impl Reflection {
    /// Creates a reflection with the default positive assessment.
    pub fn new() -> Self {
        Self {
            id: ReflectionId::generate(),
            timestamp: current_timestamp_ms(),
            assessment: Assessment::Positive,
            confidence: 0.8,
            observations: Vec::new(),
            recommendations: Vec::new(),
            needs_adjustment: false,
        }
    }

    pub fn observe(&mut self, observation: impl Into<String>) {
        self.observations.push(observation.into());
    }

    pub fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }

    /// Downgrades the assessment and flags that adjustments are needed.
    pub fn flag_for_adjustment(&mut self, confidence: f64) {
        self.assessment = Assessment::NeedsAttention;
        self.confidence = confidence;
        self.needs_adjustment = true;
    }
}

impl Default for Reflection {
    fn default() -> Self {
        Self::new()
    }
}

/// A corrective operation proposed by a reflection.
///
/// Applied by the orchestrator in emission order. Modify and remove are
/// no-ops when the target id is not on the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    AddAction(Action),
    ModifyAction {
        action_id: ActionId,
        patch: ActionPatch,
    },
    RemoveAction {
        action_id: ActionId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reflection_is_positive() {
        let reflection = Reflection::new();
        assert_eq!(reflection.assessment, Assessment::Positive);
        assert_eq!(reflection.confidence, 0.8);
        assert!(!reflection.needs_adjustment);
        assert!(reflection.observations.is_empty());
    }

    #[test]
    fn flagging_downgrades_assessment() {
        let mut reflection = Reflection::new();
        reflection.flag_for_adjustment(0.4);
        assert_eq!(reflection.assessment, Assessment::NeedsAttention);
        assert_eq!(reflection.confidence, 0.4);
        assert!(reflection.needs_adjustment);
    }

    #[test]
    fn observations_accumulate_in_order() {
        let mut reflection = Reflection::new();
        reflection.observe("first");
        reflection.observe("second");
        assert_eq!(reflection.observations, vec!["first", "second"]);
    }
}
