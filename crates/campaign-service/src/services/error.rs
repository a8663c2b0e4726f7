//! Reaction store error types
//!
//! Every failure the store reports is one of these values; nothing panics.

use campaign_common::AppError;
use campaign_core::{CampaignId, DomainError};

/// Reaction store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No signed-in user; nothing was changed
    #[error("Sign in to react to campaigns")]
    Unauthenticated,

    /// Both the grouped queries and the fallback scan failed; prior state kept
    #[error("Failed to load reactions: {0}")]
    Fetch(#[source] DomainError),

    /// The remote write failed and the optimistic change was undone
    #[error("Reaction on campaign {campaign_id} was rolled back: {source}")]
    RolledBack {
        campaign_id: CampaignId,
        #[source]
        source: DomainError,
    },

    /// The remote write failed after newer state replaced the optimistic change
    #[error("Reaction on campaign {campaign_id} failed after newer changes: {source}")]
    Superseded {
        campaign_id: CampaignId,
        #[source]
        source: DomainError,
    },
}

impl StoreError {
    /// Whether the UI should prompt for sign-in
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// The campaign a failed toggle was about
    #[must_use]
    pub fn campaign_id(&self) -> Option<CampaignId> {
        match self {
            Self::RolledBack { campaign_id, .. } | Self::Superseded { campaign_id, .. } => {
                Some(*campaign_id)
            }
            Self::Unauthenticated | Self::Fetch(_) => None,
        }
    }

    /// Get the error code for logs and UI notices
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Fetch(_) => "REACTIONS_FETCH_FAILED",
            Self::RolledBack { .. } => "REACTION_ROLLED_BACK",
            Self::Superseded { .. } => "REACTION_SUPERSEDED",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unauthenticated => AppError::Unauthenticated,
            StoreError::Fetch(source)
            | StoreError::RolledBack { source, .. }
            | StoreError::Superseded { source, .. } => AppError::Domain(source),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
