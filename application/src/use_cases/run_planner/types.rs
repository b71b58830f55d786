//! Type definitions for the RunPlanner use case.

use crate::config::ConfigPatch;
use foreman_domain::SessionContext;
use thiserror::Error;

/// Fatal errors during a `process` invocation.
///
/// Per-action validation failures are not errors at this level: they are
/// recorded on the session and the run continues. Anything surfacing here
/// aborts the whole call; no partial result is returned.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Operation cancelled")]
    Cancelled,
}

impl ProcessError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProcessError::Cancelled)
    }
}

/// Input for the RunPlanner use case
#[derive(Debug, Clone)]
pub struct ProcessInput {
    /// The instruction to plan for.
    pub input: String,
    /// Situational context; empty when omitted.
    pub context: Option<SessionContext>,
    /// Per-session configuration override. Applied on top of the active
    /// configuration for this call only.
    pub config: Option<ConfigPatch>,
}

impl ProcessInput {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            context: None,
            config: None,
        }
    }

    pub fn with_context(mut self, context: SessionContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_config(mut self, patch: ConfigPatch) -> Self {
        self.config = Some(patch);
        self
    }
}
