//! Helpers shared across use cases.

use super::run_planner::ProcessError;
use tokio_util::sync::CancellationToken;

/// Returns `ProcessError::Cancelled` when the optional token has fired.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), ProcessError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(ProcessError::Cancelled);
    }
    Ok(())
}
