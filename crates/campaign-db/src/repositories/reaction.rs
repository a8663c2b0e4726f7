//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campaign_core::entities::{Reaction, ReactionCount, UserReaction};
use campaign_core::traits::{ReactionRepository, RepoResult};
use campaign_core::value_objects::{CampaignId, ReactionKind, UserId};

use crate::mappers::{campaign_uuids, ReactionUpsert};
use crate::models::{ReactionCountModel, ReactionModel, UserReactionModel};

use super::error::{map_db_error, map_rows};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, campaign_ids), fields(campaigns = campaign_ids.len()))]
    async fn aggregate_counts(&self, campaign_ids: &[CampaignId]) -> RepoResult<Vec<ReactionCount>> {
        if campaign_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT campaign_id, reaction_type, COUNT(*) AS count
            FROM campaign_reactions
            WHERE campaign_id = ANY($1)
            GROUP BY campaign_id, reaction_type
            "#,
        )
        .bind(campaign_uuids(campaign_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(results)
    }

    #[instrument(skip(self, campaign_ids), fields(campaigns = campaign_ids.len()))]
    async fn find_user_reactions(
        &self,
        campaign_ids: &[CampaignId],
        user_id: UserId,
    ) -> RepoResult<Vec<UserReaction>> {
        if campaign_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserReactionModel>(
            r#"
            SELECT campaign_id, reaction_type
            FROM campaign_reactions
            WHERE campaign_id = ANY($1) AND user_id = $2
            "#,
        )
        .bind(campaign_uuids(campaign_ids))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(results)
    }

    #[instrument(skip(self, campaign_ids), fields(campaigns = campaign_ids.len()))]
    async fn find_by_campaigns(&self, campaign_ids: &[CampaignId]) -> RepoResult<Vec<Reaction>> {
        if campaign_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT campaign_id, user_id, reaction_type, created_at, updated_at
            FROM campaign_reactions
            WHERE campaign_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(campaign_uuids(campaign_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(results)
    }

    #[instrument(skip(self))]
    async fn upsert(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        let row = ReactionUpsert::new(campaign_id, user_id, kind);

        sqlx::query(
            r#"
            INSERT INTO campaign_reactions (campaign_id, user_id, reaction_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (campaign_id, user_id)
            DO UPDATE SET reaction_type = EXCLUDED.reaction_type, updated_at = NOW()
            "#,
        )
        .bind(row.campaign_id)
        .bind(row.user_id)
        .bind(row.reaction_type)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, campaign_id: CampaignId, user_id: UserId) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM campaign_reactions WHERE campaign_id = $1 AND user_id = $2
            "#,
        )
        .bind(campaign_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
