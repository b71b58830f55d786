//! Reflection engine
//!
//! Post-execution self-assessment of a session, plus the corrective
//! adjustments a negative assessment proposes. All heuristics evaluate
//! independently and their observations accumulate; only the error rule
//! downgrades the assessment and forces adjustments.

use crate::ports::pacing::ThinkingPacer;
use foreman_domain::{
    Action, ActionPatch, ActionSource, Adjustment, Reflection, RiskTag, Session, TOOL_FILESYSTEM,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Confidence assigned when validation errors force an adjustment pass.
const ERROR_CONFIDENCE: f64 = 0.4;
/// Action count above which decomposition is recommended.
const HIGH_ACTION_COUNT: usize = 10;
/// Priority value used to deprioritize a filesystem action that was
/// queued ahead of a package installation. Only the tag changes; the
/// action keeps its array position.
const DEPRIORITIZED: u32 = 99;

/// Use case for the reflecting phase.
pub struct ReflectionEngine {
    pacer: Arc<dyn ThinkingPacer>,
}

impl ReflectionEngine {
    pub fn new(pacer: Arc<dyn ThinkingPacer>) -> Self {
        Self { pacer }
    }

    /// Assesses the accumulated session state.
    pub async fn reflect(&self, session: &Session, thinking_ceiling: Duration) -> Reflection {
        self.pacer.pause(thinking_ceiling).await;

        let mut reflection = Reflection::new();

        if session.has_errors() {
            reflection.observe(format!(
                "{} candidate action(s) failed validation",
                session.errors.len()
            ));
            reflection.recommend("resolve validation errors before queueing further actions");
            reflection.flag_for_adjustment(ERROR_CONFIDENCE);
        }

        if session.actions.len() > HIGH_ACTION_COUNT {
            reflection.observe("high action count");
            reflection.recommend("decompose the request into smaller instructions");
        }

        if session.has_filesystem_actions() && !session.has_package_install_actions() {
            reflection.observe("file operations without dependency setup");
        }

        debug!(
            assessment = reflection.assessment.as_str(),
            needs_adjustment = reflection.needs_adjustment,
            observations = reflection.observations.len(),
            "reflected on session {}",
            session.id
        );
        reflection
    }

    /// Proposes corrective adjustments for a reflection that asked for
    /// them. Returns an empty list otherwise.
    pub fn propose_adjustments(
        &self,
        session: &Session,
        reflection: &Reflection,
    ) -> Vec<Adjustment> {
        if !reflection.needs_adjustment {
            return Vec::new();
        }

        let mut adjustments = Vec::new();

        if session.has_errors() {
            adjustments.push(Adjustment::AddAction(environment_probe()));
        }

        // Installs come conceptually first: every filesystem action that
        // sits ahead of the first package install gets deprioritized.
        if let Some(install_position) = session.first_package_install_position() {
            for action in session.actions[..install_position]
                .iter()
                .filter(|a| a.is_filesystem())
            {
                adjustments.push(Adjustment::ModifyAction {
                    action_id: action.id.clone(),
                    patch: ActionPatch::new().with_priority(DEPRIORITIZED),
                });
            }
        }

        adjustments
    }
}

/// The corrective action queued when validation errors were recorded:
/// verify the working environment before anything else.
fn environment_probe() -> Action {
    Action::new("validate_environment", TOOL_FILESYSTEM, "check_path")
        .with_parameter(".")
        .with_expected_outcome("Verify the working environment is intact")
        .with_risk(RiskTag::PotentialFileConflicts)
        .with_source(ActionSource::Reflection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::pacing::NoPacing;
    use foreman_domain::{
        Assessment, SessionContext, TOOL_EXEC, TOOL_PACKAGE_MANAGER, ValidationFailure,
    };

    fn engine() -> ReflectionEngine {
        ReflectionEngine::new(Arc::new(NoPacing))
    }

    fn session_with_input(input: &str) -> Session {
        Session::new(input, SessionContext::default())
    }

    fn no_delay() -> Duration {
        Duration::ZERO
    }

    #[tokio::test]
    async fn clean_session_reflects_positive() {
        let mut session = session_with_input("create a file");
        session.accept_action(
            Action::new("install_package", TOOL_PACKAGE_MANAGER, "install")
                .with_parameter("serde"),
        );

        let reflection = engine().reflect(&session, no_delay()).await;
        assert_eq!(reflection.assessment, Assessment::Positive);
        assert_eq!(reflection.confidence, 0.8);
        assert!(!reflection.needs_adjustment);
    }

    #[tokio::test]
    async fn errors_downgrade_and_force_adjustment() {
        let mut session = session_with_input("run something");
        let rejected = Action::new("execute_command", TOOL_EXEC, "run").with_parameter("sudo x");
        session.record_failure(ValidationFailure::for_action(
            &rejected,
            vec!["dangerous command detected".to_string()],
            0,
        ));

        let reflection = engine().reflect(&session, no_delay()).await;
        assert_eq!(reflection.assessment, Assessment::NeedsAttention);
        assert_eq!(reflection.confidence, 0.4);
        assert!(reflection.needs_adjustment);
        assert!(
            reflection
                .recommendations
                .iter()
                .any(|r| r.contains("validation errors"))
        );
    }

    #[tokio::test]
    async fn high_action_count_is_observed_without_adjustment() {
        let mut session = session_with_input("do many things");
        for i in 0..11 {
            session.accept_action(
                Action::new("create_file", TOOL_FILESYSTEM, "write_file")
                    .with_parameter(format!("file_{i}.txt")),
            );
        }

        let reflection = engine().reflect(&session, no_delay()).await;
        assert!(
            reflection
                .observations
                .contains(&"high action count".to_string())
        );
        assert!(!reflection.needs_adjustment);
    }

    #[tokio::test]
    async fn file_ops_without_installs_are_observed() {
        let mut session = session_with_input("create a file");
        session.accept_action(Action::new("create_file", TOOL_FILESYSTEM, "write_file"));

        let reflection = engine().reflect(&session, no_delay()).await;
        assert!(
            reflection
                .observations
                .contains(&"file operations without dependency setup".to_string())
        );
    }

    #[tokio::test]
    async fn adjustments_empty_when_not_flagged() {
        let session = session_with_input("quiet");
        let reflection = engine().reflect(&session, no_delay()).await;
        assert!(
            engine()
                .propose_adjustments(&session, &reflection)
                .is_empty()
        );
    }

    #[tokio::test]
    async fn errors_produce_environment_probe() {
        let mut session = session_with_input("run something");
        let rejected = Action::new("", "", "run");
        session.record_failure(ValidationFailure::for_action(
            &rejected,
            vec!["action is missing a type".to_string()],
            0,
        ));

        let reflection = engine().reflect(&session, no_delay()).await;
        let adjustments = engine().propose_adjustments(&session, &reflection);
        assert!(matches!(
            &adjustments[0],
            Adjustment::AddAction(action) if action.action_type == "validate_environment"
        ));
    }

    #[tokio::test]
    async fn filesystem_before_install_is_deprioritized() {
        let mut session = session_with_input("create then install");
        session.accept_action(
            Action::new("create_file", TOOL_FILESYSTEM, "write_file").with_parameter("a.txt"),
        );
        session.accept_action(
            Action::new("modify_file", TOOL_FILESYSTEM, "update_file").with_parameter("b.txt"),
        );
        session.accept_action(
            Action::new("install_package", TOOL_PACKAGE_MANAGER, "install")
                .with_parameter("lodash"),
        );
        // force an adjustment pass via an error
        let rejected = Action::new("", "", "");
        session.record_failure(ValidationFailure::for_action(
            &rejected,
            vec!["action is missing a type".to_string()],
            3,
        ));

        let reflection = engine().reflect(&session, no_delay()).await;
        let adjustments = engine().propose_adjustments(&session, &reflection);

        let modified: Vec<_> = adjustments
            .iter()
            .filter_map(|adj| match adj {
                Adjustment::ModifyAction { action_id, patch } => {
                    Some((action_id.clone(), patch.priority))
                }
                _ => None,
            })
            .collect();
        assert_eq!(modified.len(), 2);
        assert!(modified.iter().all(|(_, p)| *p == Some(DEPRIORITIZED)));
        assert_eq!(modified[0].0, session.actions[0].id);
        assert_eq!(modified[1].0, session.actions[1].id);
    }

    #[tokio::test]
    async fn package_install_itself_is_never_deprioritized() {
        let mut session = session_with_input("install then create");
        session.accept_action(
            Action::new("install_package", TOOL_PACKAGE_MANAGER, "install")
                .with_parameter("lodash"),
        );
        session.accept_action(
            Action::new("create_file", TOOL_FILESYSTEM, "write_file").with_parameter("a.txt"),
        );
        let rejected = Action::new("", "", "");
        session.record_failure(ValidationFailure::for_action(
            &rejected,
            vec!["action is missing a type".to_string()],
            2,
        ));

        let reflection = engine().reflect(&session, no_delay()).await;
        let adjustments = engine().propose_adjustments(&session, &reflection);

        // install is first, so no ModifyAction is emitted at all
        assert!(
            adjustments
                .iter()
                .all(|adj| !matches!(adj, Adjustment::ModifyAction { .. }))
        );
    }
}
