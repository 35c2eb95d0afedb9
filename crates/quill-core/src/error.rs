//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed on `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("Concurrent modification of {entity_type} {id}")]
    ConcurrentModification { entity_type: &'static str, id: Uuid },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn post_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A conditional write found a newer version than the one it was based on.
    #[error("Stale version")]
    StaleVersion,

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(msg) => DomainError::Internal(msg),
            other => DomainError::Unauthenticated(other.to_string()),
        }
    }
}
