//! The effort configuration table.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named configuration bundle selecting iteration bounds, planning depth,
/// reflection behavior, and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EffortLevel {
    Low,
    #[default]
    Medium,
    High,
    Maximum,
}

impl EffortLevel {
    pub fn as_str(&self) -> &str {
        match self {
            EffortLevel::Low => "low",
            EffortLevel::Medium => "medium",
            EffortLevel::High => "high",
            EffortLevel::Maximum => "maximum",
        }
    }

    /// Returns the fixed profile for this level.
    pub fn profile(&self) -> EffortProfile {
        match self {
            EffortLevel::Low => EffortProfile {
                max_iterations: 3,
                planning_depth: 1,
                reflection_enabled: false,
                thinking_time_ceiling_ms: 1000,
            },
            EffortLevel::Medium => EffortProfile {
                max_iterations: 7,
                planning_depth: 2,
                reflection_enabled: true,
                thinking_time_ceiling_ms: 3000,
            },
            EffortLevel::High => EffortProfile {
                max_iterations: 12,
                planning_depth: 3,
                reflection_enabled: true,
                thinking_time_ceiling_ms: 5000,
            },
            EffortLevel::Maximum => EffortProfile {
                max_iterations: 20,
                planning_depth: 4,
                reflection_enabled: true,
                thinking_time_ceiling_ms: 10000,
            },
        }
    }

    /// Returns all levels in ascending order of effort.
    pub fn all() -> &'static [EffortLevel] {
        &[
            EffortLevel::Low,
            EffortLevel::Medium,
            EffortLevel::High,
            EffortLevel::Maximum,
        ]
    }
}

impl FromStr for EffortLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(EffortLevel::Low),
            "medium" => Ok(EffortLevel::Medium),
            "high" => Ok(EffortLevel::High),
            "maximum" | "max" => Ok(EffortLevel::Maximum),
            other => Err(DomainError::UnknownEffortLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parameters an effort level selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortProfile {
    /// Upper bound on accepted actions per session.
    pub max_iterations: u32,
    pub planning_depth: u32,
    pub reflection_enabled: bool,
    /// Ceiling for the pseudo-random thinking delay.
    pub thinking_time_ceiling_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_table_matches_levels() {
        assert_eq!(EffortLevel::Low.profile().max_iterations, 3);
        assert!(!EffortLevel::Low.profile().reflection_enabled);
        assert_eq!(EffortLevel::Medium.profile().max_iterations, 7);
        assert_eq!(EffortLevel::High.profile().thinking_time_ceiling_ms, 5000);
        assert_eq!(EffortLevel::Maximum.profile().planning_depth, 4);
        assert!(EffortLevel::Maximum.profile().reflection_enabled);
    }

    #[test]
    fn parse_known_levels() {
        assert_eq!("low".parse::<EffortLevel>().unwrap(), EffortLevel::Low);
        assert_eq!("HIGH".parse::<EffortLevel>().unwrap(), EffortLevel::High);
        assert_eq!(
            "maximum".parse::<EffortLevel>().unwrap(),
            EffortLevel::Maximum
        );
    }

    #[test]
    fn parse_unknown_level_fails() {
        let err = "turbo".parse::<EffortLevel>().unwrap_err();
        assert!(err.to_string().contains("turbo"));
    }

    #[test]
    fn default_is_medium() {
        assert_eq!(EffortLevel::default(), EffortLevel::Medium);
    }

    #[test]
    fn levels_are_ordered_by_budget() {
        let bounds: Vec<u32> = EffortLevel::all()
            .iter()
            .map(|level| level.profile().max_iterations)
            .collect();
        assert!(bounds.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
