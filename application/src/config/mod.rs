//! Planner configuration — the runtime-adjustable knobs.
//!
//! [`PlannerConfig`] is the currently-active configuration shared by all
//! sessions; [`ConfigPatch`] is the partial update applied by
//! `update_config` (and, per-call, by `ProcessInput::config`). Unknown
//! effort names in a patch are ignored silently.

use foreman_domain::{EffortLevel, EffortProfile};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The active planner configuration.
///
/// Derived from an [`EffortLevel`]'s profile, with per-key overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub effort: EffortLevel,
    /// Upper bound on accepted actions (and the iteration counter).
    pub max_iterations: u32,
    pub enable_reflection: bool,
    pub enable_planning: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::for_effort(EffortLevel::default())
    }
}

impl PlannerConfig {
    /// Builds the configuration an effort level selects. Planning is
    /// always enabled by default; only an explicit patch disables it.
    pub fn for_effort(effort: EffortLevel) -> Self {
        let profile = effort.profile();
        Self {
            effort,
            max_iterations: profile.max_iterations,
            enable_reflection: profile.reflection_enabled,
            enable_planning: true,
        }
    }

    /// The effort profile backing this configuration.
    pub fn profile(&self) -> EffortProfile {
        self.effort.profile()
    }

    /// Applies a partial update, recognized keys only.
    ///
    /// An effort change re-derives the profile-backed fields first, so an
    /// explicit `max_iterations` or `enable_reflection` in the same patch
    /// still wins. Unrecognized effort names leave the config untouched.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(effort) = &patch.effort {
            match effort.parse::<EffortLevel>() {
                Ok(level) => *self = Self::for_effort(level).with_planning(self.enable_planning),
                Err(_) => warn!("ignoring unknown effort level '{}'", effort),
            }
        }
        if let Some(max_iterations) = patch.max_iterations {
            self.max_iterations = max_iterations;
        }
        if let Some(enable_reflection) = patch.enable_reflection {
            self.enable_reflection = enable_reflection;
        }
        if let Some(enable_planning) = patch.enable_planning {
            self.enable_planning = enable_planning;
        }
    }

    fn with_planning(mut self, enable_planning: bool) -> Self {
        self.enable_planning = enable_planning;
        self
    }

    /// Point-in-time snapshot for the status query.
    pub fn status(&self) -> ConfigStatus {
        ConfigStatus {
            effort: self.effort,
            max_iterations: self.max_iterations,
            enable_reflection: self.enable_reflection,
            enable_planning: self.enable_planning,
            profile: self.profile(),
        }
    }
}

/// Partial configuration update. Only the keys present are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigPatch {
    /// Effort level by name; unknown names are ignored silently.
    pub effort: Option<String>,
    pub max_iterations: Option<u32>,
    pub enable_reflection: Option<bool>,
    pub enable_planning: Option<bool>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_effort(mut self, effort: impl Into<String>) -> Self {
        self.effort = Some(effort.into());
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn with_reflection(mut self, enabled: bool) -> Self {
        self.enable_reflection = Some(enabled);
        self
    }

    pub fn with_planning(mut self, enabled: bool) -> Self {
        self.enable_planning = Some(enabled);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.effort.is_none()
            && self.max_iterations.is_none()
            && self.enable_reflection.is_none()
            && self.enable_planning.is_none()
    }
}

/// Snapshot returned by the status query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigStatus {
    pub effort: EffortLevel,
    pub max_iterations: u32,
    pub enable_reflection: bool,
    pub enable_planning: bool,
    pub profile: EffortProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_medium_profile() {
        let config = PlannerConfig::default();
        assert_eq!(config.effort, EffortLevel::Medium);
        assert_eq!(config.max_iterations, 7);
        assert!(config.enable_reflection);
        assert!(config.enable_planning);
    }

    #[test]
    fn effort_patch_rederives_profile_fields() {
        let mut config = PlannerConfig::default();
        config.apply(&ConfigPatch::new().with_effort("high"));
        assert_eq!(config.effort, EffortLevel::High);
        assert_eq!(config.max_iterations, 12);
    }

    #[test]
    fn explicit_override_beats_profile_in_same_patch() {
        let mut config = PlannerConfig::default();
        config.apply(
            &ConfigPatch::new()
                .with_effort("low")
                .with_max_iterations(5)
                .with_reflection(true),
        );
        assert_eq!(config.effort, EffortLevel::Low);
        assert_eq!(config.max_iterations, 5);
        assert!(config.enable_reflection);
    }

    #[test]
    fn unknown_effort_is_ignored_silently() {
        let mut config = PlannerConfig::default();
        let before = config.clone();
        config.apply(&ConfigPatch::new().with_effort("ludicrous"));
        assert_eq!(config, before);
    }

    #[test]
    fn empty_patch_is_empty_and_noop() {
        let patch = ConfigPatch::new();
        assert!(patch.is_empty());
        assert!(!patch.clone().with_reflection(false).is_empty());

        let mut config = PlannerConfig::default();
        let before = config.clone();
        config.apply(&patch);
        assert_eq!(config, before);
    }

    #[test]
    fn effort_patch_preserves_planning_flag() {
        let mut config = PlannerConfig::default();
        config.apply(&ConfigPatch::new().with_planning(false));
        config.apply(&ConfigPatch::new().with_effort("maximum"));
        assert!(!config.enable_planning);
        assert_eq!(config.effort, EffortLevel::Maximum);
    }

    #[test]
    fn status_snapshot_carries_profile() {
        let status = PlannerConfig::for_effort(EffortLevel::High).status();
        assert_eq!(status.max_iterations, 12);
        assert_eq!(status.profile.thinking_time_ceiling_ms, 5000);
    }
}
