//! Application layer for agent-foreman
//!
//! Use cases and ports. The use cases drive the domain's planning
//! heuristics through the plan→execute→reflect state machine; the ports
//! ([`LifecycleObserver`], [`ThinkingPacer`]) are the seams the
//! infrastructure layer plugs into.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigPatch, ConfigStatus, PlannerConfig};
pub use ports::{
    LifecycleObserver, NoLifecycle, NoPacing, SessionFailed, SessionStarted, ThinkingPacer,
};
pub use use_cases::{
    GeneratePlanUseCase, ProcessError, ProcessInput, ReflectionEngine, ResultFinalizer,
    RunPlannerUseCase,
};
