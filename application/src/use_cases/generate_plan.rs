//! Generate Plan use case
//!
//! Wraps the pure domain plan builder with pacing and logging. The pacer
//! pause models deliberation, not computation: it is a cooperative yield
//! bounded by the effort level's thinking-time ceiling.

use crate::ports::pacing::ThinkingPacer;
use foreman_domain::util::ellipsize;
use foreman_domain::{ComplexityReport, EffortProfile, Plan, build_plan};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Use case for generating a plan from an instruction.
pub struct GeneratePlanUseCase {
    pacer: Arc<dyn ThinkingPacer>,
}

impl GeneratePlanUseCase {
    pub fn new(pacer: Arc<dyn ThinkingPacer>) -> Self {
        Self { pacer }
    }

    /// Produces the plan for an instruction.
    ///
    /// Infallible by design: pattern matching falls back to a general
    /// task and parameter extraction falls back to fixed defaults.
    pub async fn execute(
        &self,
        input: &str,
        complexity: &ComplexityReport,
        profile: &EffortProfile,
    ) -> Plan {
        self.pacer
            .pause(Duration::from_millis(profile.thinking_time_ceiling_ms))
            .await;

        let plan = build_plan(input, complexity);
        debug!(
            strategy = plan.strategy.as_str(),
            steps = plan.steps.len(),
            actions = plan.actions.len(),
            estimated_ms = plan.estimated_duration_ms,
            "generated plan for '{}'",
            ellipsize(input, 80)
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::pacing::NoPacing;
    use foreman_domain::{EffortLevel, SessionContext, Strategy, analyze};

    fn use_case() -> GeneratePlanUseCase {
        GeneratePlanUseCase::new(Arc::new(NoPacing))
    }

    #[tokio::test]
    async fn plan_for_simple_file_creation() {
        let input = "create a file called notes.txt";
        let complexity = analyze(input, &SessionContext::default());
        let profile = EffortLevel::Medium.profile();

        let plan = use_case().execute(input, &complexity, &profile).await;
        assert_eq!(plan.strategy, Strategy::DirectExecution);
        assert_eq!(plan.actions.len(), 1);
        assert_eq!(plan.actions[0].first_parameter_str(), Some("notes.txt"));
    }

    #[tokio::test]
    async fn plan_is_never_empty() {
        let input = "contemplate";
        let complexity = analyze(input, &SessionContext::default());
        let profile = EffortLevel::Low.profile();

        let plan = use_case().execute(input, &complexity, &profile).await;
        assert!(!plan.is_empty());
    }
}
