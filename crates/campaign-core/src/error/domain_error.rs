//! Domain errors - error types for the domain layer

use std::time::Duration;

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    #[error("No authenticated user")]
    Unauthenticated,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Backend request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidId(_) => "INVALID_ID",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Timeout(_) => "TIMEOUT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::BackendError(_) => "BACKEND_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidReactionKind(_) | Self::InvalidId(_) | Self::ValidationError(_)
        )
    }

    /// Check if the failure came from talking to the backend
    ///
    /// Transient failures are worth retrying or falling back on.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::DatabaseError(_) | Self::BackendError(_)
        )
    }
}

impl From<crate::value_objects::IdParseError> for DomainError {
    fn from(err: crate::value_objects::IdParseError) -> Self {
        Self::InvalidId(err.0)
    }
}
