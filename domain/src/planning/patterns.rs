//! Instruction pattern table and parameter extractors.
//!
//! The planner's "understanding" of an instruction is a fixed, ordered
//! table of compiled matchers. Table order is the matching precedence and
//! the tie-break for equal-priority steps; the `priority` field is the
//! sort key that decides step execution order. New patterns are additive:
//! append a [`PatternSpec`] row and an arm in [`expand_step`].
//!
//! Parameter extraction never fails — every extractor falls back to a
//! fixed literal default so a matched pattern always yields a usable
//! action.

use super::entities::{Action, PlanStep, StepType};
use super::value_objects::{RiskTag, TOOL_EXEC, TOOL_FILESYSTEM, TOOL_PACKAGE_MANAGER};
use regex::Regex;
use std::sync::LazyLock;

/// Fallback filename when none can be extracted.
const DEFAULT_FILENAME: &str = "new_file.txt";
/// Fallback package when none can be extracted.
const DEFAULT_PACKAGE: &str = "express";
/// Fallback command when none can be extracted.
const DEFAULT_COMMAND: &str = "echo \"Hello World\"";
/// Fallback modification target and content.
const DEFAULT_MODIFY_TARGET: &str = "file.txt";
const DEFAULT_MODIFY_CONTENT: &str = "modified content";

/// One row of the instruction pattern table.
pub struct PatternSpec {
    pub step_type: StepType,
    /// Tool family the step's actions target.
    pub tool: &'static str,
    /// Step sort key; lower runs earlier.
    pub priority: u32,
    regex: Regex,
}

impl PatternSpec {
    fn new(step_type: StepType, tool: &'static str, priority: u32, pattern: &str) -> Self {
        Self {
            step_type,
            tool,
            priority,
            regex: Regex::new(pattern).expect("fixed pattern compiles"),
        }
    }

    /// Returns the matched instruction substring, if the row matches.
    pub fn find<'i>(&self, input: &'i str) -> Option<&'i str> {
        self.regex.find(input).map(|m| m.as_str())
    }
}

/// Priority assigned to the fallback general-task step.
const GENERAL_TASK_PRIORITY: u32 = 9;

static PATTERN_TABLE: LazyLock<Vec<PatternSpec>> = LazyLock::new(|| {
    vec![
        PatternSpec::new(
            StepType::FileCreation,
            TOOL_FILESYSTEM,
            3,
            r"(?i)create\s+(?:a\s+|an\s+)?(?:new\s+)?file(?:\s+(?:called|named)\s+\S+)?",
        ),
        PatternSpec::new(
            StepType::PackageInstallation,
            TOOL_PACKAGE_MANAGER,
            1,
            r"(?i)install\s+(?:the\s+)?(?:package\s+|dependency\s+|module\s+)?[\w@./-]+",
        ),
        PatternSpec::new(
            StepType::CommandExecution,
            TOOL_EXEC,
            5,
            r"(?i)(?:run|execute)\s+(?:the\s+)?(?:command\s+)?[^\n.;]+",
        ),
        PatternSpec::new(
            StepType::FileModification,
            TOOL_FILESYSTEM,
            4,
            r"(?i)(?:modify|update|edit|change)\s+(?:the\s+)?(?:file\s+)?\S+",
        ),
        PatternSpec::new(
            StepType::EnvironmentSetup,
            TOOL_FILESYSTEM,
            2,
            r"(?i)(?:set\s?up|setup|initialize|init)\s+(?:a\s+|the\s+|new\s+)*(?:[\w-]+\s+)?(?:environment|project|workspace|repo(?:sitory)?)",
        ),
    ]
});

/// The fixed instruction pattern table, in matching precedence order.
pub fn pattern_table() -> &'static [PatternSpec] {
    &PATTERN_TABLE
}

/// Matches an instruction against the pattern table.
///
/// Each matching row yields one step carrying the matched substring as its
/// description. When nothing matches, a single
/// [`StepType::GeneralTask`] step covers the whole instruction. Steps are
/// numbered in table order; sorting by priority is the caller's concern.
pub fn match_steps(input: &str) -> Vec<PlanStep> {
    let mut steps = Vec::new();

    for spec in pattern_table() {
        if let Some(matched) = spec.find(input) {
            steps.push(PlanStep::new(
                format!("{}", steps.len() + 1),
                spec.step_type,
                spec.tool,
                spec.priority,
                matched,
            ));
        }
    }

    if steps.is_empty() {
        steps.push(PlanStep::new(
            "1",
            StepType::GeneralTask,
            TOOL_EXEC,
            GENERAL_TASK_PRIORITY,
            input,
        ));
    }

    steps
}

/// Expands a step into its actions via the fixed step-type templates.
///
/// Most step types map to exactly one action; `EnvironmentSetup` expands
/// to two (directory creation, then project initialization). Parameters
/// are extracted from the full instruction so a step's description never
/// has to carry them.
pub fn expand_step(step: &PlanStep, input: &str) -> Vec<Action> {
    match step.step_type {
        StepType::FileCreation => {
            let filename = extract_filename(input, DEFAULT_FILENAME);
            vec![
                Action::new("create_file", TOOL_FILESYSTEM, "write_file")
                    .with_parameter(filename.clone())
                    .with_expected_outcome(format!("Create file {}", filename))
                    .with_risk(RiskTag::PotentialFileConflicts)
                    .with_priority(step.priority),
            ]
        }
        StepType::PackageInstallation => {
            let package = extract_package(input);
            vec![
                Action::new("install_package", TOOL_PACKAGE_MANAGER, "install")
                    .with_parameter(package.clone())
                    .with_expected_outcome(format!("Install package {}", package))
                    .with_risk(RiskTag::NetworkDependency)
                    .with_priority(step.priority),
            ]
        }
        StepType::CommandExecution => {
            let command = extract_command(input);
            vec![
                Action::new("execute_command", TOOL_EXEC, "run")
                    .with_parameter(command.clone())
                    .with_expected_outcome(format!("Run command {}", command))
                    .with_risk(RiskTag::CommandExecutionFailure)
                    .with_priority(step.priority),
            ]
        }
        StepType::FileModification => {
            let target = extract_filename(input, DEFAULT_MODIFY_TARGET);
            vec![
                Action::new("modify_file", TOOL_FILESYSTEM, "update_file")
                    .with_parameter(target.clone())
                    .with_parameter(DEFAULT_MODIFY_CONTENT)
                    .with_expected_outcome(format!("Modify file {}", target))
                    .with_risk(RiskTag::PotentialFileConflicts)
                    .with_priority(step.priority),
            ]
        }
        StepType::EnvironmentSetup => {
            let name = extract_project_name(input);
            vec![
                Action::new("create_directory", TOOL_FILESYSTEM, "create_dir")
                    .with_parameter(name.clone())
                    .with_expected_outcome(format!("Create project directory {}", name))
                    .with_risk(RiskTag::PotentialFileConflicts)
                    .with_priority(step.priority),
                Action::new("initialize_project", TOOL_EXEC, "run")
                    .with_parameter("npm init -y")
                    .with_expected_outcome(format!("Initialize project in {}", name))
                    .with_risk(RiskTag::CommandExecutionFailure)
                    .with_priority(step.priority),
            ]
        }
        StepType::GeneralTask => {
            vec![
                Action::new("general_task", TOOL_EXEC, "run")
                    .with_parameter(extract_command(input))
                    .with_expected_outcome("Carry out the requested task")
                    .with_risk(RiskTag::CommandExecutionFailure)
                    .with_priority(step.priority),
            ]
        }
    }
}

/// Base duration estimate per action type, in milliseconds.
pub fn base_duration_ms(action_type: &str) -> u64 {
    match action_type {
        "create_file" => 2000,
        "install_package" => 30000,
        "execute_command" => 5000,
        "modify_file" => 3000,
        _ => 2000,
    }
}

static FILENAME_NAMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:called|named)\s+([\w./-]+)").expect("fixed pattern compiles")
});
static FILENAME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w./-]+\.[A-Za-z0-9]{1,8})\b").expect("fixed pattern compiles")
});

fn extract_filename(input: &str, default: &str) -> String {
    if let Some(caps) = FILENAME_NAMED.captures(input) {
        return caps[1].to_string();
    }
    if let Some(caps) = FILENAME_TOKEN.captures(input) {
        return caps[1].to_string();
    }
    default.to_string()
}

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)install\s+(?:the\s+)?(?:package\s+|dependency\s+|module\s+)?([\w@./-]+)")
        .expect("fixed pattern compiles")
});

fn extract_package(input: &str) -> String {
    PACKAGE_NAME
        .captures(input)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_PACKAGE.to_string())
}

static COMMAND_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:`([^`]+)`|"([^"]+)"|'([^']+)')"#).expect("fixed pattern compiles")
});
static COMMAND_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:run|execute)\s+(?:the\s+)?(?:command\s+)?([^\n.;]+)")
        .expect("fixed pattern compiles")
});

fn extract_command(input: &str) -> String {
    if let Some(caps) = COMMAND_QUOTED.captures(input) {
        for group in 1..=3 {
            if let Some(m) = caps.get(group) {
                return m.as_str().to_string();
            }
        }
    }
    if let Some(caps) = COMMAND_PHRASE.captures(input) {
        return caps[1].trim().to_string();
    }
    DEFAULT_COMMAND.to_string()
}

static PROJECT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:set\s?up|setup|initialize|init)\s+(?:a\s+|the\s+|new\s+)*([\w-]+)\s+(?:environment|project|workspace|repo(?:sitory)?)")
        .expect("fixed pattern compiles")
});

fn extract_project_name(input: &str) -> String {
    PROJECT_NAME
        .captures(input)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "project".to_string())
}
