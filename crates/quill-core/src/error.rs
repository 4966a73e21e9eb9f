//! Domain-level error types.

use thiserror::Error;

use crate::validation::PostValidationError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    /// Rejected input. The message is meant to be shown to the submitting user.
    #[error(transparent)]
    Validation(#[from] PostValidationError),

    /// The store refused or failed the insert. Carries no store detail.
    #[error("Failed to create post")]
    CreateFailed,
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
}
