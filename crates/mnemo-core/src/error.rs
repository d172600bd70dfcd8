//! Service error types.

use thiserror::Error;

/// Errors returned by the learning service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested material does not exist.
    #[error("material not found: {0}")]
    MaterialNotFound(String),

    /// The requested question does not exist.
    #[error("question not found: {0}")]
    QuestionNotFound(String),

    /// The requested question count is outside the allowed range.
    #[error("question count must be between 1 and {max}, got {requested}")]
    InvalidCount { requested: usize, max: usize },
}

impl ServiceError {
    /// Returns `true` for the not-found cases.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::MaterialNotFound(_) | ServiceError::QuestionNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_and_not_found() {
        let err = ServiceError::MaterialNotFound("m-42".into());
        assert_eq!(err.to_string(), "material not found: m-42");
        assert!(err.is_not_found());

        let err = ServiceError::InvalidCount {
            requested: 50,
            max: 20,
        };
        assert!(!err.is_not_found());
    }
}
