//! Domain error types.

use thiserror::Error;
use validator::ValidationErrors;

/// Errors produced by domain services and the stores they call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The backing store could not be reached or rejected the statement.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, err.code),
                })
            })
            .collect();
        // field_errors() is backed by a HashMap
        messages.sort();

        DomainError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(length(min = 1))]
        content: String,
    }

    #[test]
    fn test_validation_errors_include_field_and_message() {
        let sample = Sample {
            title: String::new(),
            content: "ok".to_string(),
        };
        let err: DomainError = sample.validate().unwrap_err().into();
        assert_eq!(
            err,
            DomainError::Validation("title: Title is required".to_string())
        );
    }

    #[test]
    fn test_validation_errors_fall_back_to_code() {
        let sample = Sample {
            title: "ok".to_string(),
            content: String::new(),
        };
        let err: DomainError = sample.validate().unwrap_err().into();
        assert_eq!(err, DomainError::Validation("content: length".to_string()));
    }

    #[test]
    fn test_multiple_validation_errors_are_joined_in_order() {
        let sample = Sample {
            title: String::new(),
            content: String::new(),
        };
        let err: DomainError = sample.validate().unwrap_err().into();
        assert_eq!(
            err,
            DomainError::Validation("content: length, title: Title is required".to_string())
        );
    }

    #[test]
    fn test_domain_error_display() {
        assert_eq!(
            DomainError::NotFound("Note not found".into()).to_string(),
            "Not found: Note not found"
        );
        assert_eq!(
            DomainError::Conflict("dup".into()).to_string(),
            "Conflict: dup"
        );
        assert_eq!(
            DomainError::Storage("down".into()).to_string(),
            "Storage error: down"
        );
    }
}
