//! Use cases - the planner's application logic.

pub mod finalize;
pub mod generate_plan;
pub mod reflect;
pub mod run_planner;
pub(crate) mod shared;

pub use finalize::ResultFinalizer;
pub use generate_plan::GeneratePlanUseCase;
pub use reflect::ReflectionEngine;
pub use run_planner::{ProcessError, ProcessInput, RunPlannerUseCase};
