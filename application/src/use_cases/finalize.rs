//! Result finalizer
//!
//! Computes the derived metrics (token estimate, confidence) and
//! assembles the terminal [`PlannerResult`] from a finished session. The
//! session is consumed: after finalization only the result record exists.

use crate::config::PlannerConfig;
use chrono::Utc;
use foreman_domain::{ComplexityLevel, PlannerResult, RunMetadata, Session};
use std::time::Duration;

/// Lower and upper clamps for the confidence metric.
const CONFIDENCE_FLOOR: f64 = 0.1;
const CONFIDENCE_CEILING: f64 = 1.0;

/// Assembles the terminal result record for a completed session.
pub struct ResultFinalizer;

impl ResultFinalizer {
    pub fn finalize(
        session: Session,
        config: &PlannerConfig,
        duration: Duration,
    ) -> PlannerResult {
        let tokens_used = estimate_tokens(&session);
        let confidence = estimate_confidence(&session);

        PlannerResult {
            id: session.id,
            input: session.input,
            effort: config.effort,
            complexity: session.complexity,
            plan: session.plan,
            actions: session.actions,
            reflections: session.reflections,
            errors: session.errors,
            iterations: session.iteration,
            duration_ms: duration.as_millis() as u64,
            tokens_used,
            confidence,
            status: session.status,
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                profile: config.profile(),
                enable_reflection: config.enable_reflection,
                enable_planning: config.enable_planning,
            },
        }
    }
}

/// Heuristic token estimate: a quarter token per input character, plus
/// flat costs per plan, reflection, and action.
fn estimate_tokens(session: &Session) -> u64 {
    let input_tokens = session.input.len() as f64 / 4.0;
    let plan_tokens = if session.plan.is_some() { 500.0 } else { 0.0 };
    let reflection_tokens = session.reflections.len() as f64 * 200.0;
    let action_tokens = session.actions.len() as f64 * 50.0;

    (input_tokens + plan_tokens + reflection_tokens + action_tokens).round() as u64
}

/// Confidence starts at 0.8 and moves with the session's shape, clamped
/// to `[0.1, 1.0]`.
fn estimate_confidence(session: &Session) -> f64 {
    let mut confidence = 0.8;

    confidence -= 0.1 * session.errors.len() as f64;

    let complexity_high = session
        .complexity
        .as_ref()
        .is_some_and(|c| c.level == ComplexityLevel::High);
    if complexity_high && session.plan.is_none() {
        confidence -= 0.2;
    }

    if session.plan.is_some() && !session.actions.is_empty() {
        confidence += 0.1;
    }

    if !session.reflections.is_empty() {
        confidence += 0.05;
    }

    confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foreman_domain::{
        Action, Reflection, SessionContext, SessionStatus, TOOL_FILESYSTEM, ValidationFailure,
        analyze, build_plan,
    };

    fn finished_session(input: &str) -> Session {
        let mut session = Session::new(input, SessionContext::default());
        session.set_status(SessionStatus::Completed);
        session
    }

    #[test]
    fn tokens_count_input_plan_reflections_actions() {
        let input = "create a file called notes.txt"; // 30 chars
        let mut session = finished_session(input);
        let complexity = analyze(input, &SessionContext::default());
        session.plan = Some(build_plan(input, &complexity));
        session.complexity = Some(complexity);
        session.accept_action(Action::new("create_file", TOOL_FILESYSTEM, "write_file"));
        session.add_reflection(Reflection::new());

        let result =
            ResultFinalizer::finalize(session, &PlannerConfig::default(), Duration::ZERO);
        // 30/4 = 7.5 -> +500 plan +200 reflection +50 action = 757.5 -> 758
        assert_eq!(result.tokens_used, 758);
    }

    #[test]
    fn confidence_rises_with_plan_and_actions() {
        let input = "create a file called notes.txt";
        let mut session = finished_session(input);
        let complexity = analyze(input, &SessionContext::default());
        session.plan = Some(build_plan(input, &complexity));
        session.complexity = Some(complexity);
        session.accept_action(Action::new("create_file", TOOL_FILESYSTEM, "write_file"));

        let result =
            ResultFinalizer::finalize(session, &PlannerConfig::default(), Duration::ZERO);
        assert!((result.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn each_error_costs_a_tenth() {
        let mut session = finished_session("run things");
        for _ in 0..2 {
            let rejected = Action::new("", "", "");
            session.record_failure(ValidationFailure::for_action(
                &rejected,
                vec!["action is missing a type".to_string()],
                0,
            ));
        }

        let result =
            ResultFinalizer::finalize(session, &PlannerConfig::default(), Duration::ZERO);
        assert!((result.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn confidence_never_leaves_the_clamp() {
        let mut session = finished_session("chaos");
        for _ in 0..20 {
            let rejected = Action::new("", "", "");
            session.record_failure(ValidationFailure::for_action(
                &rejected,
                vec!["action is missing a type".to_string()],
                0,
            ));
        }

        let result =
            ResultFinalizer::finalize(session, &PlannerConfig::default(), Duration::ZERO);
        assert!(result.confidence >= 0.1);
        assert!(result.confidence <= 1.0);
    }

    #[test]
    fn metadata_snapshots_the_config() {
        let config = PlannerConfig::for_effort(foreman_domain::EffortLevel::High);
        let session = finished_session("create a file");
        let result = ResultFinalizer::finalize(session, &config, Duration::from_millis(42));

        assert_eq!(result.effort, foreman_domain::EffortLevel::High);
        assert_eq!(result.metadata.profile.max_iterations, 12);
        assert_eq!(result.duration_ms, 42);
        assert!(!result.metadata.timestamp.is_empty());
        assert!(!result.metadata.version.is_empty());
    }
}
