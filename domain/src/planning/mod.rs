//! Plan synthesis: pattern matching, step expansion, and the entities
//! they produce.

pub mod entities;
pub mod patterns;
pub mod plan_builder;
pub mod value_objects;

pub use entities::{
    Action, ActionPatch, ActionSource, ActionStatus, Plan, PlanStep, StepType, Strategy,
};
pub use plan_builder::{build_plan, direct_actions};
pub use value_objects::{
    ActionId, ReflectionId, RiskTag, SessionId, TOOL_EXEC, TOOL_FILESYSTEM, TOOL_PACKAGE_MANAGER,
};
