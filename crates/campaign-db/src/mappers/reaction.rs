//! Reaction entity <-> model mappers

use campaign_core::entities::{Reaction, ReactionCount, UserReaction};
use campaign_core::value_objects::{CampaignId, ReactionKind, UserId};
use campaign_core::DomainError;
use uuid::Uuid;

use crate::models::{ReactionCountModel, ReactionModel, UserReactionModel};

/// Convert ReactionModel to Reaction entity
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            campaign_id: CampaignId::new(model.campaign_id),
            user_id: UserId::new(model.user_id),
            kind: model.reaction_type.parse()?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ReactionCountModel> for ReactionCount {
    type Error = DomainError;

    fn try_from(model: ReactionCountModel) -> Result<Self, Self::Error> {
        let count = u32::try_from(model.count).map_err(|_| {
            DomainError::DatabaseError(format!("reaction count out of range: {}", model.count))
        })?;
        Ok(ReactionCount::new(
            CampaignId::new(model.campaign_id),
            model.reaction_type.parse()?,
            count,
        ))
    }
}

impl TryFrom<UserReactionModel> for UserReaction {
    type Error = DomainError;

    fn try_from(model: UserReactionModel) -> Result<Self, Self::Error> {
        Ok(UserReaction {
            campaign_id: CampaignId::new(model.campaign_id),
            kind: model.reaction_type.parse()?,
        })
    }
}

/// Campaign ids as a bindable UUID array
pub fn campaign_uuids(ids: &[CampaignId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_inner()).collect()
}

/// Values bound by the upsert statement
pub struct ReactionUpsert {
    pub campaign_id: Uuid,
    pub user_id: Uuid,
    pub reaction_type: &'static str,
}

impl ReactionUpsert {
    pub fn new(campaign_id: CampaignId, user_id: UserId, kind: ReactionKind) -> Self {
        Self {
            campaign_id: campaign_id.into_inner(),
            user_id: user_id.into_inner(),
            reaction_type: kind.as_str(),
        }
    }
}
