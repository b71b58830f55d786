//! Run Planner use case
//!
//! Drives the planning state machine for one `process` invocation:
//!
//! | Phase          | Gate                                   |
//! |----------------|----------------------------------------|
//! | 1. Thinking    | `enable_planning`                      |
//! | 2. Executing   | always; bounded by `max_iterations`    |
//! | 3. Reflecting  | `should_reflect` policy                |
//! | 4. Finalizing  | always                                 |
//!
//! The session is exclusively owned here and threaded `&mut` through the
//! phases; on success it is consumed by the finalizer. Any fatal error
//! aborts the whole call — observers get an `error` notification with the
//! elapsed duration and the error propagates to the caller with no
//! partial result.

mod types;

pub use types::{ProcessError, ProcessInput};

use crate::config::{ConfigPatch, ConfigStatus, PlannerConfig};
use crate::ports::lifecycle::{LifecycleObserver, NoLifecycle, SessionFailed, SessionStarted};
use crate::ports::pacing::ThinkingPacer;
use crate::use_cases::finalize::ResultFinalizer;
use crate::use_cases::generate_plan::GeneratePlanUseCase;
use crate::use_cases::reflect::ReflectionEngine;
use crate::use_cases::shared::check_cancelled;
use foreman_domain::util::ellipsize;
use foreman_domain::{
    ActionValidator, Adjustment, DefaultActionValidator, PlannerResult, Session, SessionStatus,
    ValidationFailure, analyze, direct_actions,
};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Action count above which reflection triggers on its own.
const REFLECT_ACTION_COUNT: usize = 5;

/// Use case for running the bounded heuristic planner.
///
/// Holds the currently-active configuration; independent `execute` calls
/// may run concurrently as logically independent sessions. The shared
/// configuration is last-write-wins: an [`update_config`](Self::update_config)
/// landing mid-session changes that session's iteration bound too, unless
/// the session pinned its own bound via a per-call config patch.
pub struct RunPlannerUseCase {
    config: Arc<RwLock<PlannerConfig>>,
    pacer: Arc<dyn ThinkingPacer>,
    validator: Arc<dyn ActionValidator + Send + Sync>,
    cancellation_token: Option<CancellationToken>,
}

impl RunPlannerUseCase {
    pub fn new(pacer: Arc<dyn ThinkingPacer>) -> Self {
        Self {
            config: Arc::new(RwLock::new(PlannerConfig::default())),
            pacer,
            validator: Arc::new(DefaultActionValidator),
            cancellation_token: None,
        }
    }

    pub fn with_config(self, config: PlannerConfig) -> Self {
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn ActionValidator + Send + Sync>) -> Self {
        self.validator = validator;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Applies a partial configuration update.
    ///
    /// Recognized keys only; unknown effort names are ignored silently.
    /// Visible to subsequently started sessions (and to the iteration
    /// bound of unpinned in-flight ones).
    pub fn update_config(&self, patch: &ConfigPatch) {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        config.apply(patch);
        info!(
            effort = config.effort.as_str(),
            max_iterations = config.max_iterations,
            "planner configuration updated"
        );
    }

    /// Point-in-time snapshot of the active configuration.
    pub fn status(&self) -> ConfigStatus {
        self.active_config().status()
    }

    /// Run the planner without lifecycle reporting
    pub async fn execute(&self, input: ProcessInput) -> Result<PlannerResult, ProcessError> {
        self.execute_with_observer(input, &NoLifecycle).await
    }

    /// Run the planner with lifecycle callbacks
    pub async fn execute_with_observer(
        &self,
        input: ProcessInput,
        observer: &dyn LifecycleObserver,
    ) -> Result<PlannerResult, ProcessError> {
        let started = Instant::now();

        // Resolve this session's configuration: active config plus the
        // per-call patch. A patch pins the iteration bound for the whole
        // session; otherwise the bound is re-read from the shared config
        // each pass.
        let mut config = self.active_config();
        if let Some(patch) = &input.config {
            config.apply(patch);
        }
        let pinned_bound = input.config.as_ref().map(|_| config.max_iterations);

        let mut session = Session::new(input.input, input.context.unwrap_or_default());
        info!(
            session = session.id.as_str(),
            effort = config.effort.as_str(),
            "starting session for '{}'",
            ellipsize(&session.input, 120)
        );
        observer.on_start(&SessionStarted {
            session_id: session.id.clone(),
            input: session.input.clone(),
        });

        match self.run_phases(&mut session, &config, pinned_bound).await {
            Ok(()) => {
                session.set_status(session.completion_status());
                let result = ResultFinalizer::finalize(session, &config, started.elapsed());
                info!(
                    session = result.id.as_str(),
                    status = result.status.as_str(),
                    actions = result.actions.len(),
                    "session finished"
                );
                observer.on_complete(&result);
                Ok(result)
            }
            Err(error) => {
                session.set_status(SessionStatus::Failed);
                warn!(session = session.id.as_str(), "session failed: {}", error);
                observer.on_error(&SessionFailed {
                    session_id: session.id.clone(),
                    message: error.to_string(),
                    duration: started.elapsed(),
                });
                Err(error)
            }
        }
    }

    async fn run_phases(
        &self,
        session: &mut Session,
        config: &PlannerConfig,
        pinned_bound: Option<u32>,
    ) -> Result<(), ProcessError> {
        // ==================== Phase 1: Thinking / Planning ====================
        if config.enable_planning {
            session.set_status(SessionStatus::Thinking);
            let complexity = analyze(&session.input, &session.context);
            debug!(
                score = complexity.score,
                level = complexity.level.as_str(),
                "complexity analyzed"
            );

            let plan = GeneratePlanUseCase::new(self.pacer.clone())
                .execute(&session.input, &complexity, &config.profile())
                .await;
            session.complexity = Some(complexity);
            session.plan = Some(plan);
        }

        // ==================== Phase 2: Executing ====================
        session.set_status(SessionStatus::Executing);
        let candidates = match &session.plan {
            Some(plan) => plan.actions.clone(),
            None => direct_actions(&session.input),
        };

        for candidate in candidates {
            if session.iteration >= self.current_bound(pinned_bound) {
                debug!(
                    session = session.id.as_str(),
                    "iteration bound reached; dropping remaining candidates"
                );
                break;
            }
            check_cancelled(&self.cancellation_token)?;

            let report = self.validator.validate(&candidate);
            for warning in &report.warnings {
                warn!(session = session.id.as_str(), "{}", warning);
            }
            if report.valid {
                session.accept_action(candidate);
            } else {
                let iteration = session.iteration;
                session.record_failure(ValidationFailure::for_action(
                    &candidate,
                    report.errors,
                    iteration,
                ));
            }
        }

        // ==================== Phase 3: Reflecting ====================
        if self.should_reflect(session, config) {
            check_cancelled(&self.cancellation_token)?;
            session.set_status(SessionStatus::Reflecting);

            let engine = ReflectionEngine::new(self.pacer.clone());
            let ceiling = Duration::from_millis(config.profile().thinking_time_ceiling_ms);
            let reflection = engine.reflect(session, ceiling).await;
            let adjustments = engine.propose_adjustments(session, &reflection);
            session.add_reflection(reflection);

            for adjustment in adjustments {
                self.apply_adjustment(session, adjustment, pinned_bound);
            }
        }

        Ok(())
    }

    /// Reflection policy: enabled, and something worth assessing —
    /// validation failures, a long action list, or elevated complexity.
    fn should_reflect(&self, session: &Session, config: &PlannerConfig) -> bool {
        config.enable_reflection
            && (session.has_errors()
                || session.actions.len() > REFLECT_ACTION_COUNT
                || session
                    .complexity
                    .as_ref()
                    .is_some_and(|c| c.level.is_elevated()))
    }

    fn apply_adjustment(
        &self,
        session: &mut Session,
        adjustment: Adjustment,
        pinned_bound: Option<u32>,
    ) {
        match adjustment {
            Adjustment::AddAction(action) => {
                // A corrective action consumes an iteration slot like any
                // other; an exhausted budget drops it.
                if session.iteration < self.current_bound(pinned_bound) {
                    session.accept_action(action);
                } else {
                    debug!(
                        session = session.id.as_str(),
                        "iteration budget exhausted; dropping corrective action"
                    );
                }
            }
            Adjustment::ModifyAction { action_id, patch } => {
                if let Some(action) = session.find_action_mut(&action_id) {
                    action.apply_patch(&patch);
                }
            }
            Adjustment::RemoveAction { action_id } => {
                session.remove_action(&action_id);
            }
        }
    }

    /// The iteration bound in effect right now: the per-call pin when the
    /// caller supplied one, the live shared config otherwise.
    fn current_bound(&self, pinned: Option<u32>) -> u32 {
        pinned.unwrap_or_else(|| {
            self.config
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .max_iterations
        })
    }

    fn active_config(&self) -> PlannerConfig {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
