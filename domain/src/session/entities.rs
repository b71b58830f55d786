//! Session domain entities

use crate::complexity::ComplexityReport;
use crate::planning::entities::{Action, ActionStatus, Plan};
use crate::planning::value_objects::{ActionId, SessionId, current_timestamp_ms};
use crate::reflection::Reflection;
use serde::{Deserialize, Serialize};

/// Phase of the planning state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Analyzing the instruction and generating a plan.
    Thinking,
    /// Validating and queueing candidate actions.
    Executing,
    /// Running the self-assessment pass.
    Reflecting,
    /// Finished with no validation failures.
    Completed,
    /// Finished, but some candidate actions were rejected.
    CompletedWithErrors,
    /// Aborted by an unhandled error.
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Thinking => "thinking",
            SessionStatus::Executing => "executing",
            SessionStatus::Reflecting => "reflecting",
            SessionStatus::Completed => "completed",
            SessionStatus::CompletedWithErrors => "completed_with_errors",
            SessionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::CompletedWithErrors | SessionStatus::Failed
        )
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file known to the caller's working context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextFile {
    pub name: String,
}

/// Situational context supplied by the caller.
///
/// Read-only to the planner core; only its shape feeds the complexity
/// heuristics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub files: Vec<ContextFile>,
    pub working_directory: Option<String>,
    pub conversation: Vec<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn add_file(&mut self, name: impl Into<String>) {
        self.files.push(ContextFile { name: name.into() });
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.conversation.push(message.into());
    }
}

/// Record of a candidate action rejected by validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub action_type: String,
    pub tool: String,
    pub messages: Vec<String>,
    /// Iteration counter value at rejection time.
    pub iteration: u32,
}

impl ValidationFailure {
    pub fn for_action(action: &Action, messages: Vec<String>, iteration: u32) -> Self {
        Self {
            action_type: action.action_type.clone(),
            tool: action.tool.clone(),
            messages,
            iteration,
        }
    }
}

/// The mutable state container for one end-to-end `process` invocation
/// (Entity).
///
/// Exclusively owned by the orchestrator for the lifetime of the call and
/// threaded `&mut` through the phases; never aliased across concurrent
/// sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// The original instruction, immutable after creation.
    pub input: String,
    pub context: SessionContext,
    /// Monotonically non-decreasing, bounded by the configured maximum.
    pub iteration: u32,
    pub complexity: Option<ComplexityReport>,
    pub plan: Option<Plan>,
    /// Insertion order is significant.
    pub actions: Vec<Action>,
    pub reflections: Vec<Reflection>,
    pub errors: Vec<ValidationFailure>,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(input: impl Into<String>, context: SessionContext) -> Self {
        Self {
            id: SessionId::generate(),
            input: input.into(),
            context,
            iteration: 0,
            complexity: None,
            plan: None,
            actions: Vec::new(),
            reflections: Vec::new(),
            errors: Vec::new(),
            status: SessionStatus::Thinking,
        }
    }

    pub fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    /// Queues a validated action, consuming one iteration slot.
    ///
    /// The action gets a fresh id and timestamp, the current iteration
    /// counter, and `Planned` status; the counter increments once per
    /// accepted action.
    pub fn accept_action(&mut self, mut action: Action) {
        action.id = ActionId::generate();
        action.created_at = current_timestamp_ms();
        action.iteration = self.iteration;
        action.status = ActionStatus::Planned;
        self.actions.push(action);
        self.iteration += 1;
    }

    /// Records a rejected candidate. The action itself is dropped.
    pub fn record_failure(&mut self, failure: ValidationFailure) {
        self.errors.push(failure);
    }

    pub fn add_reflection(&mut self, reflection: Reflection) {
        self.reflections.push(reflection);
    }

    pub fn find_action_mut(&mut self, id: &ActionId) -> Option<&mut Action> {
        self.actions.iter_mut().find(|a| &a.id == id)
    }

    /// Removes an action by id. Returns `false` when the id is unknown.
    pub fn remove_action(&mut self, id: &ActionId) -> bool {
        let before = self.actions.len();
        self.actions.retain(|a| &a.id != id);
        self.actions.len() != before
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_filesystem_actions(&self) -> bool {
        self.actions.iter().any(|a| a.is_filesystem())
    }

    pub fn has_package_install_actions(&self) -> bool {
        self.actions.iter().any(|a| a.is_package_install())
    }

    /// Position of the first package-install action, if any.
    pub fn first_package_install_position(&self) -> Option<usize> {
        self.actions.iter().position(|a| a.is_package_install())
    }

    /// Terminal status for a session that ran to completion.
    pub fn completion_status(&self) -> SessionStatus {
        if self.has_errors() {
            SessionStatus::CompletedWithErrors
        } else {
            SessionStatus::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::value_objects::{TOOL_FILESYSTEM, TOOL_PACKAGE_MANAGER};

    fn session() -> Session {
        Session::new("create a file", SessionContext::default())
    }

    #[test]
    fn new_session_starts_thinking() {
        let session = session();
        assert_eq!(session.status, SessionStatus::Thinking);
        assert_eq!(session.iteration, 0);
        assert!(session.actions.is_empty());
        assert!(!session.status.is_terminal());
    }

    #[test]
    fn accept_action_freshens_and_counts() {
        let mut session = session();
        let candidate = Action::new("create_file", TOOL_FILESYSTEM, "write_file");
        let original_id = candidate.id.clone();

        session.accept_action(candidate);

        assert_eq!(session.iteration, 1);
        assert_eq!(session.actions.len(), 1);
        assert_ne!(session.actions[0].id, original_id);
        assert_eq!(session.actions[0].iteration, 0);
        assert_eq!(session.actions[0].status, ActionStatus::Planned);
    }

    #[test]
    fn accepted_action_ids_are_unique() {
        let mut session = session();
        for _ in 0..5 {
            session.accept_action(Action::new("create_file", TOOL_FILESYSTEM, "write_file"));
        }
        let mut ids: Vec<&str> = session.actions.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn remove_action_is_noop_for_unknown_id() {
        let mut session = session();
        session.accept_action(Action::new("create_file", TOOL_FILESYSTEM, "write_file"));
        assert!(!session.remove_action(&ActionId::new("action-unknown")));
        assert_eq!(session.actions.len(), 1);
    }

    #[test]
    fn first_package_install_position_scans_in_order() {
        let mut session = session();
        session.accept_action(Action::new("create_file", TOOL_FILESYSTEM, "write_file"));
        session.accept_action(Action::new(
            "install_package",
            TOOL_PACKAGE_MANAGER,
            "install",
        ));
        assert_eq!(session.first_package_install_position(), Some(1));
        assert!(session.has_filesystem_actions());
        assert!(session.has_package_install_actions());
    }

    #[test]
    fn completion_status_tracks_errors() {
        let mut session = session();
        assert_eq!(session.completion_status(), SessionStatus::Completed);

        let rejected = Action::new("execute_command", "", "run");
        session.record_failure(ValidationFailure::for_action(
            &rejected,
            vec!["action is missing a tool".to_string()],
            0,
        ));
        assert_eq!(
            session.completion_status(),
            SessionStatus::CompletedWithErrors
        );
    }
}
