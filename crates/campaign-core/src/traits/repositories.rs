//! Repository traits (ports) - define the interface for data access
//!
//! The reaction store only ever talks to the backend through these traits.
//! Infrastructure crates provide the implementations.

use async_trait::async_trait;

use crate::entities::{Reaction, ReactionCount, UserReaction};
use crate::error::DomainError;
use crate::value_objects::{CampaignId, ReactionKind, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Count reactions grouped by campaign and kind
    ///
    /// Campaigns without reactions produce no rows.
    async fn aggregate_counts(&self, campaign_ids: &[CampaignId]) -> RepoResult<Vec<ReactionCount>>;

    /// Get the reactions `user_id` has on the given campaigns
    async fn find_user_reactions(
        &self,
        campaign_ids: &[CampaignId],
        user_id: UserId,
    ) -> RepoResult<Vec<UserReaction>>;

    /// Get every raw reaction row for the given campaigns
    async fn find_by_campaigns(&self, campaign_ids: &[CampaignId]) -> RepoResult<Vec<Reaction>>;

    /// Insert, or replace the kind of, the reaction keyed by `(campaign_id, user_id)`
    async fn upsert(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<()>;

    /// Remove the reaction keyed by `(campaign_id, user_id)`, if any
    async fn delete(&self, campaign_id: CampaignId, user_id: UserId) -> RepoResult<()>;
}

// ============================================================================
// Session
// ============================================================================

/// Source of the currently signed-in user
///
/// The session is held locally (a verified access token), so the lookup is
/// synchronous.
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, or `None` when signed out or the session expired
    fn current_user(&self) -> Option<UserId>;
}
