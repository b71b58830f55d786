//! Planning value objects - immutable identifiers and tags.
//!
//! # Identifiers
//! - [`SessionId`] - Unique identifier for one planning session
//! - [`ActionId`] - Unique identifier for an action within a session
//! - [`ReflectionId`] - Unique identifier for a reflection record
//!
//! # Tags
//! - [`RiskTag`] - Coarse risk categories attached to actions and plans
//!
//! # Tool names
//! Tool identifiers are plain strings on [`Action`](super::entities::Action);
//! the constants here keep the literals in one place.

use serde::{Deserialize, Serialize};

/// Tool identifier for filesystem-touching actions.
pub const TOOL_FILESYSTEM: &str = "filesystem";
/// Tool identifier for process-execution actions.
pub const TOOL_EXEC: &str = "exec";
/// Tool identifier for package-manager actions.
pub const TOOL_PACKAGE_MANAGER: &str = "package_manager";

/// Unique identifier for a planning session.
///
/// Each `process()` invocation gets a unique ID for tracking and correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a SessionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new unique SessionId using a UUID-like format.
    pub fn generate() -> Self {
        Self(format!("session-{}", uuid_v4()))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for SessionId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an action within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    /// Creates an ActionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new unique ActionId.
    pub fn generate() -> Self {
        Self(format!("action-{}", uuid_v4()))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for ActionId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reflection record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReflectionId(String);

impl ReflectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("reflection-{}", uuid_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse risk categories attached to actions and aggregated onto plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTag {
    /// A filesystem action may clash with existing files.
    PotentialFileConflicts,
    /// A shell command may fail at execution time.
    CommandExecutionFailure,
    /// A package installation depends on network availability.
    NetworkDependency,
}

impl RiskTag {
    pub fn as_str(&self) -> &str {
        match self {
            RiskTag::PotentialFileConflicts => "potential_file_conflicts",
            RiskTag::CommandExecutionFailure => "command_execution_failure",
            RiskTag::NetworkDependency => "network_dependency",
        }
    }
}

impl std::fmt::Display for RiskTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generate a simple UUID v4 (without external dependency)
///
/// Pseudo-random from the clock; a process-wide counter in the low bits
/// keeps ids distinct even when two are generated within one clock tick.
fn uuid_v4() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    let nanos = now.as_nanos();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (nanos >> 96) as u32,
        (nanos >> 80) as u16,
        (nanos >> 64) as u16 & 0x0fff,
        ((nanos >> 48) as u16 & 0x3fff) | 0x8000,
        (((nanos as u64) << 16) | (count & 0xffff)) & 0xffffffffffff
    )
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
