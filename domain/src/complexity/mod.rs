//! Instruction complexity scoring.
//!
//! [`analyze`] turns an instruction plus its [`SessionContext`] into a
//! [`ComplexityReport`]: an additive score, a categorical level, and the
//! factors that contributed. The scoring is fully deterministic keyword
//! heuristics; there is no language understanding here.

use crate::session::SessionContext;
use serde::{Deserialize, Serialize};

/// Instruction phrases that indicate a multi-step request.
const MULTI_STEP_PHRASES: &[&str] = &[
    "then",
    "after",
    "next",
    "also",
    "and then",
    "followed by",
    "create and",
    "build and",
    "setup and",
    "install and",
];

/// Keywords that indicate file operations.
const FILE_OP_KEYWORDS: &[&str] = &["create", "modify", "delete", "move", "copy"];

/// Input length above which the instruction counts as long.
const LONG_INPUT_CHARS: usize = 500;
/// Input length above which the instruction counts as medium.
const MEDIUM_INPUT_CHARS: usize = 200;
/// Context file count above which the `ManyFiles` factor applies.
const MANY_FILES_THRESHOLD: usize = 10;

/// Categorical difficulty estimate derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityLevel {
    /// Maps an additive score to its level.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 6 => ComplexityLevel::VeryHigh,
            s if s >= 4 => ComplexityLevel::High,
            s if s >= 2 => ComplexityLevel::Medium,
            _ => ComplexityLevel::Low,
        }
    }

    /// True for the levels that trigger reflection on their own.
    pub fn is_elevated(&self) -> bool {
        matches!(self, ComplexityLevel::High | ComplexityLevel::VeryHigh)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ComplexityLevel::Low => "low",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::High => "high",
            ComplexityLevel::VeryHigh => "very_high",
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scoring rule that fired during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityFactor {
    LongInput,
    MediumInput,
    ComplexMultiStep,
    MultiStep,
    ComplexFileOps,
    MultipleFileOps,
    ManyFiles,
}

impl ComplexityFactor {
    pub fn as_str(&self) -> &str {
        match self {
            ComplexityFactor::LongInput => "long_input",
            ComplexityFactor::MediumInput => "medium_input",
            ComplexityFactor::ComplexMultiStep => "complex_multi_step",
            ComplexityFactor::MultiStep => "multi_step",
            ComplexityFactor::ComplexFileOps => "complex_file_ops",
            ComplexityFactor::MultipleFileOps => "multiple_file_ops",
            ComplexityFactor::ManyFiles => "many_files",
        }
    }
}

impl std::fmt::Display for ComplexityFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of complexity analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub score: u32,
    pub level: ComplexityLevel,
    pub factors: Vec<ComplexityFactor>,
}

impl ComplexityReport {
    pub fn has_factor(&self, factor: ComplexityFactor) -> bool {
        self.factors.contains(&factor)
    }
}

/// Scores an instruction against its context.
///
/// Rules are additive and independent:
/// - input length: > 500 chars +2 (`long_input`), else > 200 chars +1
///   (`medium_input`)
/// - distinct multi-step phrases present: > 2 gives +3
///   (`complex_multi_step`), > 0 gives +1 (`multi_step`)
/// - distinct file-operation keywords present: > 3 gives +2
///   (`complex_file_ops`), > 1 gives +1 (`multiple_file_ops`)
/// - more than 10 known context files: +1 (`many_files`)
///
/// Empty input scores 0 and maps to [`ComplexityLevel::Low`].
pub fn analyze(input: &str, context: &SessionContext) -> ComplexityReport {
    let mut score = 0;
    let mut factors = Vec::new();
    let lowered = input.to_lowercase();

    if input.chars().count() > LONG_INPUT_CHARS {
        score += 2;
        factors.push(ComplexityFactor::LongInput);
    } else if input.chars().count() > MEDIUM_INPUT_CHARS {
        score += 1;
        factors.push(ComplexityFactor::MediumInput);
    }

    let multi_step_count = MULTI_STEP_PHRASES
        .iter()
        .filter(|phrase| lowered.contains(*phrase))
        .count();
    if multi_step_count > 2 {
        score += 3;
        factors.push(ComplexityFactor::ComplexMultiStep);
    } else if multi_step_count > 0 {
        score += 1;
        factors.push(ComplexityFactor::MultiStep);
    }

    let file_op_count = FILE_OP_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count();
    if file_op_count > 3 {
        score += 2;
        factors.push(ComplexityFactor::ComplexFileOps);
    } else if file_op_count > 1 {
        score += 1;
        factors.push(ComplexityFactor::MultipleFileOps);
    }

    if context.files.len() > MANY_FILES_THRESHOLD {
        score += 1;
        factors.push(ComplexityFactor::ManyFiles);
    }

    ComplexityReport {
        score,
        level: ComplexityLevel::from_score(score),
        factors,
    }
}
