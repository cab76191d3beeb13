//! Domain errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
