//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the campaign_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub campaign_id: Uuid,
    pub user_id: Uuid,
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated reaction count (from GROUP BY query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub campaign_id: Uuid,
    pub reaction_type: String,
    pub count: i64,
}

/// The current user's reaction on one campaign
#[derive(Debug, Clone, FromRow)]
pub struct UserReactionModel {
    pub campaign_id: Uuid,
    pub reaction_type: String,
}
