//! Store events - notifications for UI code that re-renders on change
//!
//! Events carry identifiers only; readers call `snapshot()` for the data.

use serde::Serialize;

use crate::value_objects::{CampaignId, ReactionKind};

/// A change to the reaction store's visible state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreEvent {
    /// State was replaced by a completed fetch
    Refreshed { campaigns: usize },
    /// A click was applied locally, before the backend confirmed it
    Optimistic {
        campaign_id: CampaignId,
        kind: Option<ReactionKind>,
    },
    /// The backend accepted the write for a campaign
    Confirmed { campaign_id: CampaignId },
    /// The backend rejected the write and the local change was undone
    RolledBack { campaign_id: CampaignId },
}

impl StoreEvent {
    /// The campaign the event is about, if it concerns a single one
    pub fn campaign_id(&self) -> Option<CampaignId> {
        match self {
            Self::Refreshed { .. } => None,
            Self::Optimistic { campaign_id, .. }
            | Self::Confirmed { campaign_id }
            | Self::RolledBack { campaign_id } => Some(*campaign_id),
        }
    }
}
