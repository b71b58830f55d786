//! Action validation
//!
//! Pure structural and safety checks on a single [`Action`] before it is
//! queued. Rules collect rather than short-circuit, so a report carries
//! every applicable error. A failed validation never aborts the session;
//! the orchestrator records the failure and drops the action.

use crate::planning::entities::Action;
use crate::planning::value_objects::{TOOL_EXEC, TOOL_FILESYSTEM};
use serde::{Deserialize, Serialize};

/// Command substrings that are rejected outright on exec actions.
const DANGEROUS_COMMANDS: &[&str] = &["rm -rf", "sudo", "format", "del"];

/// Outcome of validating one action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validator for candidate actions.
///
/// A pure domain trait: implementations inspect the action record only,
/// no I/O.
pub trait ActionValidator {
    fn validate(&self, action: &Action) -> ValidationReport;
}

/// Default implementation of [`ActionValidator`].
#[derive(Debug, Clone, Default)]
pub struct DefaultActionValidator;

impl ActionValidator for DefaultActionValidator {
    fn validate(&self, action: &Action) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if action.action_type.is_empty() {
            errors.push("action is missing a type".to_string());
        }
        if action.tool.is_empty() {
            errors.push("action is missing a tool".to_string());
        }

        if action.tool == TOOL_FILESYSTEM
            && let Some(path) = action.first_parameter_str()
            && path.contains("..")
        {
            warnings.push(format!("path traversal risk in '{}'", path));
        }

        if action.tool == TOOL_EXEC
            && let Some(command) = action.first_parameter_str()
            && DANGEROUS_COMMANDS
                .iter()
                .any(|dangerous| command.contains(dangerous))
        {
            errors.push("dangerous command detected".to_string());
        }

        ValidationReport::from_findings(errors, warnings)
    }
}
