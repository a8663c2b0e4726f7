//! Optimistic adjustments and their exact inverse
//!
//! A toggle is described by an [`Adjustment`] computed from the visible state.
//! Applying it returns an [`AppliedAdjustment`] that remembers the campaign's
//! prior entry, so a rollback restores it exactly and touches nothing else.

use super::aggregate::{KindCounts, ReactionState};
use crate::value_objects::{CampaignId, ReactionKind};

/// The effect of one click on one campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub campaign_id: CampaignId,
    pub previous: Option<ReactionKind>,
    pub next: Option<ReactionKind>,
}

impl Adjustment {
    /// Describe a click on `kind`: clicking the active kind removes it,
    /// anything else selects `kind` (replacing the previous one)
    pub fn toggle(state: &ReactionState, campaign_id: CampaignId, kind: ReactionKind) -> Self {
        let previous = state.user_index.get(campaign_id);
        let next = if previous == Some(kind) {
            None
        } else {
            Some(kind)
        };
        Self {
            campaign_id,
            previous,
            next,
        }
    }

    #[inline]
    pub fn is_removal(&self) -> bool {
        self.next.is_none()
    }

    /// Mutate `state` and return the record needed to undo it
    pub fn apply(self, state: &mut ReactionState) -> AppliedAdjustment {
        let campaign_id = self.campaign_id;
        let prior_counts = state.aggregate.get(campaign_id).cloned();
        let prior_kind = state.user_index.get(campaign_id);

        if let Some(previous) = self.previous {
            state.aggregate.decrement(campaign_id, previous);
        }
        if let Some(next) = self.next {
            state.aggregate.increment(campaign_id, next);
        }
        state.user_index.set(campaign_id, self.next);

        AppliedAdjustment {
            adjustment: self,
            prior_counts,
            prior_kind,
        }
    }
}

/// An adjustment that has been applied, with the values it overwrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAdjustment {
    adjustment: Adjustment,
    prior_counts: Option<KindCounts>,
    prior_kind: Option<ReactionKind>,
}

impl AppliedAdjustment {
    pub fn adjustment(&self) -> &Adjustment {
        &self.adjustment
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.adjustment.campaign_id
    }

    /// Restore the campaign's entry to what it was before `apply`
    pub fn revert(&self, state: &mut ReactionState) {
        let campaign_id = self.adjustment.campaign_id;
        state
            .aggregate
            .restore(campaign_id, self.prior_counts.clone());
        state.user_index.set(campaign_id, self.prior_kind);
    }
}
