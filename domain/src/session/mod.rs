//! Session state for one end-to-end planning invocation.

pub mod entities;
pub mod result;

pub use entities::{ContextFile, Session, SessionContext, SessionStatus, ValidationFailure};
pub use result::{PlannerResult, RunMetadata};
