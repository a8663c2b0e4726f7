//! Reaction entity - one user's sentiment on one campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CampaignId, ReactionKind, UserId};

/// Reaction entity
///
/// The backend keeps at most one row per `(campaign_id, user_id)`; choosing a
/// different kind replaces the existing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(campaign_id: CampaignId, user_id: UserId, kind: ReactionKind) -> Self {
        let now = Utc::now();
        Self {
            campaign_id,
            user_id,
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the chosen kind, bumping `updated_at`
    pub fn change_kind(&mut self, kind: ReactionKind) {
        self.kind = kind;
        self.updated_at = Utc::now();
    }

    #[inline]
    pub fn is_kind(&self, kind: ReactionKind) -> bool {
        self.kind == kind
    }
}

/// Aggregated count of one kind on one campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub campaign_id: CampaignId,
    pub kind: ReactionKind,
    pub count: u32,
}

impl ReactionCount {
    pub fn new(campaign_id: CampaignId, kind: ReactionKind, count: u32) -> Self {
        Self {
            campaign_id,
            kind,
            count,
        }
    }
}

/// The current user's reaction on a campaign (no user id, it is implied)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReaction {
    pub campaign_id: CampaignId,
    pub kind: ReactionKind,
}

impl From<&Reaction> for UserReaction {
    fn from(reaction: &Reaction) -> Self {
        Self {
            campaign_id: reaction.campaign_id,
            kind: reaction.kind,
        }
    }
}
