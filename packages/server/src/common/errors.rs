use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error taxonomy for the CRM core operations.
///
/// `Validation` and `Conflict` are user-facing and recoverable; `NotFound`
/// is terminal for the operation; `Upstream` covers collaborator failures
/// that escaped their containment policy.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("upstream service error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    /// Shorthand for a single-field validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldViolation::new(field, message)])
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{what} not found"))
    }

    /// Maps a database error to `Conflict` when it is a unique-constraint
    /// violation. The unique indexes on slug and client contact rows are the
    /// authoritative guard against check-then-act races; this turns their
    /// violations into the same error the fast-path check would have raised.
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict(message.to_string())
        } else {
            Self::Database(err)
        }
    }

    /// Same as [`conflict_on_unique`](Self::conflict_on_unique) for errors
    /// that come back wrapped in `anyhow` from the model layer.
    pub fn conflict_on_unique_anyhow(err: anyhow::Error, message: &str) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(db_err) => Self::conflict_on_unique(db_err, message),
            Err(other) => Self::Internal(other),
        }
    }
}

/// True when the error is a Postgres unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_shorthand_carries_the_field() {
        let err = DomainError::validation("title", "Title is required");
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "title");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_unique_db_errors_pass_through() {
        let err = DomainError::conflict_on_unique(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(err, DomainError::Database(_)));
    }
}
