//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown effort level: {0}")]
    UnknownEffortLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_effort_display() {
        let error = DomainError::UnknownEffortLevel("turbo".to_string());
        assert_eq!(error.to_string(), "Unknown effort level: turbo");
    }
}
