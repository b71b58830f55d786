//! Plan synthesis from matched instruction patterns.
//!
//! Pure domain logic: [`build_plan`] assembles a full [`Plan`] (sorted
//! steps, expanded actions, duration estimate, aggregated risks) and
//! [`direct_actions`] is the lighter-weight path used when planning is
//! disabled — pattern table straight to actions, no steps, no estimates.

use super::entities::{Action, Plan, Strategy};
use super::patterns::{base_duration_ms, expand_step, match_steps};
use crate::complexity::ComplexityReport;

/// Builds a plan for an instruction.
///
/// Steps are stable-sorted ascending by priority (ties keep pattern-table
/// order), then expanded through the fixed step templates. The strategy is
/// chosen from the complexity level.
pub fn build_plan(input: &str, complexity: &ComplexityReport) -> Plan {
    let mut steps = match_steps(input);
    steps.sort_by_key(|step| step.priority);

    let mut plan = Plan::new(Strategy::for_complexity(complexity.level));

    for step in steps {
        for action in expand_step(&step, input) {
            plan.estimated_duration_ms += base_duration_ms(&action.action_type);
            plan.add_action(action);
        }
        plan.add_step(step);
    }

    plan
}

/// Expands an instruction straight to candidate actions.
///
/// Used when the planning phase is disabled: no step records, no strategy
/// selection, no duration estimate. Actions come out in pattern-table
/// order.
pub fn direct_actions(input: &str) -> Vec<Action> {
    match_steps(input)
        .iter()
        .flat_map(|step| expand_step(step, input))
        .collect()
}
