//! Planning domain entities

use super::value_objects::{
    ActionId, RiskTag, TOOL_EXEC, TOOL_FILESYSTEM, TOOL_PACKAGE_MANAGER, current_timestamp_ms,
};
use crate::complexity::ComplexityLevel;
use serde::{Deserialize, Serialize};

/// Execution strategy chosen from the complexity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Low complexity: run the actions straight through.
    DirectExecution,
    /// Medium complexity: plan first, then execute.
    PlannedExecution,
    /// High complexity: execute in passes, reassessing between them.
    IterativeExecution,
    /// Very high complexity: smallest possible increments.
    CautiousExecution,
}

impl Strategy {
    /// Maps a complexity level to the strategy used for it.
    pub fn for_complexity(level: ComplexityLevel) -> Self {
        match level {
            ComplexityLevel::Low => Strategy::DirectExecution,
            ComplexityLevel::Medium => Strategy::PlannedExecution,
            ComplexityLevel::High => Strategy::IterativeExecution,
            ComplexityLevel::VeryHigh => Strategy::CautiousExecution,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Strategy::DirectExecution => "direct_execution",
            Strategy::PlannedExecution => "planned_execution",
            Strategy::IterativeExecution => "iterative_execution",
            Strategy::CautiousExecution => "cautious_execution",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of work a plan step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    FileCreation,
    PackageInstallation,
    CommandExecution,
    FileModification,
    EnvironmentSetup,
    /// Fallback when no instruction pattern matches.
    GeneralTask,
}

impl StepType {
    pub fn as_str(&self) -> &str {
        match self {
            StepType::FileCreation => "file_creation",
            StepType::PackageInstallation => "package_installation",
            StepType::CommandExecution => "command_execution",
            StepType::FileModification => "file_modification",
            StepType::EnvironmentSetup => "environment_setup",
            StepType::GeneralTask => "general_task",
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single step within a plan, before expansion into actions.
///
/// Steps are numbered sequentially within a plan ("1", "2", ...) and carry
/// the instruction substring that produced them as their description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    pub id: String,
    pub step_type: StepType,
    /// The tool family the step's actions will target.
    pub tool: String,
    /// Sort key: lower runs earlier. Ties keep pattern-table order.
    pub priority: u32,
    pub description: String,
}

impl PlanStep {
    pub fn new(
        id: impl Into<String>,
        step_type: StepType,
        tool: impl Into<String>,
        priority: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            step_type,
            tool: tool.into(),
            priority,
            description: description.into(),
        }
    }
}

/// Status of an action. The planner core only ever produces `Planned`;
/// the remaining states belong to the external executors that consume
/// the action records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Failed,
    Skipped,
}

impl ActionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ActionStatus::Planned => "planned",
            ActionStatus::InProgress => "in_progress",
            ActionStatus::Completed => "completed",
            ActionStatus::Failed => "failed",
            ActionStatus::Skipped => "skipped",
        }
    }
}

/// Which phase queued an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    /// Produced by plan expansion (or the direct generator).
    Plan,
    /// Added by a reflection adjustment.
    Reflection,
}

/// The atomic unit of work handed to external executors.
///
/// Actions are never executed by this core; they are validated, queued on
/// the session, and returned in the final result for executors to consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique within the owning session.
    pub id: ActionId,
    /// Semantic descriptor, e.g. "create_file".
    pub action_type: String,
    /// Tool family, e.g. "filesystem".
    pub tool: String,
    /// Method on the tool, e.g. "write_file".
    pub method: String,
    /// Ordered, opaque parameter values.
    pub parameters: Vec<serde_json::Value>,
    /// Human-readable description of the intended outcome.
    pub expected_outcome: String,
    pub risks: Vec<RiskTag>,
    /// Sort key mirroring the originating step. Reflection deprioritizes
    /// an action by raising this value; array position is untouched.
    pub priority: u32,
    pub status: ActionStatus,
    /// The session iteration at which this action was queued.
    pub iteration: u32,
    pub source: ActionSource,
    /// Creation timestamp in milliseconds.
    pub created_at: u64,
}

impl Action {
    pub fn new(
        action_type: impl Into<String>,
        tool: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            id: ActionId::generate(),
            action_type: action_type.into(),
            tool: tool.into(),
            method: method.into(),
            parameters: Vec::new(),
            expected_outcome: String::new(),
            risks: Vec::new(),
            priority: 0,
            status: ActionStatus::Planned,
            iteration: 0,
            source: ActionSource::Plan,
            created_at: current_timestamp_ms(),
        }
    }

    pub fn with_parameter(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.push(value.into());
        self
    }

    pub fn with_expected_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.expected_outcome = outcome.into();
        self
    }

    pub fn with_risk(mut self, risk: RiskTag) -> Self {
        if !self.risks.contains(&risk) {
            self.risks.push(risk);
        }
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_source(mut self, source: ActionSource) -> Self {
        self.source = source;
        self
    }

    /// Returns the first parameter as a string slice, if present.
    pub fn first_parameter_str(&self) -> Option<&str> {
        self.parameters.first().and_then(|v| v.as_str())
    }

    pub fn is_filesystem(&self) -> bool {
        self.tool == TOOL_FILESYSTEM
    }

    pub fn is_exec(&self) -> bool {
        self.tool == TOOL_EXEC
    }

    pub fn is_package_install(&self) -> bool {
        self.tool == TOOL_PACKAGE_MANAGER || self.action_type == "install_package"
    }

    /// Applies a typed patch, changing only the fields the patch carries.
    pub fn apply_patch(&mut self, patch: &ActionPatch) {
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(parameters) = &patch.parameters {
            self.parameters = parameters.clone();
        }
    }
}

/// Typed patch for the mutable fields of an [`Action`].
///
/// Enumerates exactly the fields a reflection adjustment may change;
/// everything else on the action is immutable after queueing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPatch {
    pub priority: Option<u32>,
    pub status: Option<ActionStatus>,
    pub parameters: Option<Vec<serde_json::Value>>,
}

impl ActionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: ActionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<serde_json::Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.status.is_none() && self.parameters.is_none()
    }
}

/// A plan: ordered steps and the actions derived from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub strategy: Strategy,
    /// Sorted ascending by priority; ties keep pattern-table order.
    pub steps: Vec<PlanStep>,
    /// Derived from the sorted steps, in step order.
    pub actions: Vec<Action>,
    /// Sum of per-action base duration estimates.
    pub estimated_duration_ms: u64,
    /// Union of the risks of all actions, first-seen order.
    pub risks: Vec<RiskTag>,
}

impl Plan {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            steps: Vec::new(),
            actions: Vec::new(),
            estimated_duration_ms: 0,
            risks: Vec::new(),
        }
    }

    pub fn add_step(&mut self, step: PlanStep) {
        self.steps.push(step);
    }

    pub fn add_action(&mut self, action: Action) {
        for risk in &action.risks {
            if !self.risks.contains(risk) {
                self.risks.push(*risk);
            }
        }
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_complexity() {
        assert_eq!(
            Strategy::for_complexity(ComplexityLevel::Low),
            Strategy::DirectExecution
        );
        assert_eq!(
            Strategy::for_complexity(ComplexityLevel::Medium),
            Strategy::PlannedExecution
        );
        assert_eq!(
            Strategy::for_complexity(ComplexityLevel::High),
            Strategy::IterativeExecution
        );
        assert_eq!(
            Strategy::for_complexity(ComplexityLevel::VeryHigh),
            Strategy::CautiousExecution
        );
    }

    #[test]
    fn test_action_builder() {
        let action = Action::new("create_file", TOOL_FILESYSTEM, "write_file")
            .with_parameter("notes.txt")
            .with_expected_outcome("Create file notes.txt")
            .with_risk(RiskTag::PotentialFileConflicts)
            .with_priority(3);

        assert_eq!(action.action_type, "create_file");
        assert_eq!(action.first_parameter_str(), Some("notes.txt"));
        assert_eq!(action.status, ActionStatus::Planned);
        assert_eq!(action.priority, 3);
        assert!(action.is_filesystem());
        assert!(!action.is_exec());
    }

    #[test]
    fn test_action_risk_dedup() {
        let action = Action::new("modify_file", TOOL_FILESYSTEM, "update_file")
            .with_risk(RiskTag::PotentialFileConflicts)
            .with_risk(RiskTag::PotentialFileConflicts);
        assert_eq!(action.risks.len(), 1);
    }

    #[test]
    fn test_apply_patch_changes_only_given_fields() {
        let mut action = Action::new("create_file", TOOL_FILESYSTEM, "write_file")
            .with_parameter("a.txt")
            .with_priority(2);

        action.apply_patch(&ActionPatch::new().with_priority(999));
        assert_eq!(action.priority, 999);
        assert_eq!(action.status, ActionStatus::Planned);
        assert_eq!(action.first_parameter_str(), Some("a.txt"));

        action.apply_patch(&ActionPatch::new().with_status(ActionStatus::Skipped));
        assert_eq!(action.status, ActionStatus::Skipped);
        assert_eq!(action.priority, 999);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let patch = ActionPatch::new();
        assert!(patch.is_empty());

        let mut action = Action::new("execute_command", TOOL_EXEC, "run").with_priority(5);
        action.apply_patch(&patch);
        assert_eq!(action.priority, 5);
    }

    #[test]
    fn test_plan_aggregates_risks() {
        let mut plan = Plan::new(Strategy::PlannedExecution);
        plan.add_action(
            Action::new("install_package", TOOL_PACKAGE_MANAGER, "install")
                .with_risk(RiskTag::NetworkDependency),
        );
        plan.add_action(
            Action::new("create_file", TOOL_FILESYSTEM, "write_file")
                .with_risk(RiskTag::PotentialFileConflicts),
        );
        plan.add_action(
            Action::new("modify_file", TOOL_FILESYSTEM, "update_file")
                .with_risk(RiskTag::PotentialFileConflicts),
        );

        assert_eq!(
            plan.risks,
            vec![RiskTag::NetworkDependency, RiskTag::PotentialFileConflicts]
        );
    }

    #[test]
    fn test_package_install_detection() {
        let by_tool = Action::new("add_dependency", TOOL_PACKAGE_MANAGER, "install");
        let by_type = Action::new("install_package", TOOL_EXEC, "run");
        assert!(by_tool.is_package_install());
        assert!(by_type.is_package_install());
    }
}
