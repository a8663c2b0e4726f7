//! Derived reaction state: per-campaign counts and the current user's picks

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::entities::{Reaction, ReactionCount, UserReaction};
use crate::value_objects::{CampaignId, ReactionKind, UserId};

/// Counts per kind for a single campaign. Absent keys mean zero.
pub type KindCounts = BTreeMap<ReactionKind, u32>;

/// campaign -> kind -> count
///
/// Counts stored here are always positive; a kind that drops to zero is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReactionAggregate(HashMap<CampaignId, KindCounts>);

impl ReactionAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts for a campaign, `None` if the campaign has no entry at all
    pub fn get(&self, campaign_id: CampaignId) -> Option<&KindCounts> {
        self.0.get(&campaign_id)
    }

    pub fn contains(&self, campaign_id: CampaignId) -> bool {
        self.0.contains_key(&campaign_id)
    }

    pub fn count(&self, campaign_id: CampaignId, kind: ReactionKind) -> u32 {
        self.0
            .get(&campaign_id)
            .and_then(|counts| counts.get(&kind))
            .copied()
            .unwrap_or(0)
    }

    /// Sum over all kinds for a campaign
    pub fn total(&self, campaign_id: CampaignId) -> u32 {
        self.0
            .get(&campaign_id)
            .map_or(0, |counts| counts.values().sum())
    }

    /// Make sure every campaign has an entry, even an empty one
    pub fn zero_fill(&mut self, campaign_ids: impl IntoIterator<Item = CampaignId>) {
        for campaign_id in campaign_ids {
            self.0.entry(campaign_id).or_default();
        }
    }

    /// Overwrite one count; zero removes the key but keeps the campaign entry
    pub fn set(&mut self, campaign_id: CampaignId, kind: ReactionKind, count: u32) {
        let counts = self.0.entry(campaign_id).or_default();
        if count == 0 {
            counts.remove(&kind);
        } else {
            counts.insert(kind, count);
        }
    }

    pub fn increment(&mut self, campaign_id: CampaignId, kind: ReactionKind) {
        *self.0.entry(campaign_id).or_default().entry(kind).or_insert(0) += 1;
    }

    /// Decrement, flooring at zero; the key is dropped once it reaches zero
    pub fn decrement(&mut self, campaign_id: CampaignId, kind: ReactionKind) {
        let counts = self.0.entry(campaign_id).or_default();
        match counts.get(&kind).copied() {
            Some(n) if n > 1 => {
                counts.insert(kind, n - 1);
            }
            _ => {
                counts.remove(&kind);
            }
        }
    }

    /// Replace (or remove, with `None`) the whole entry of one campaign
    pub fn restore(&mut self, campaign_id: CampaignId, counts: Option<KindCounts>) {
        match counts {
            Some(counts) => {
                self.0.insert(campaign_id, counts);
            }
            None => {
                self.0.remove(&campaign_id);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CampaignId, &KindCounts)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// campaign -> the current user's active kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserReactionIndex(HashMap<CampaignId, ReactionKind>);

impl UserReactionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, campaign_id: CampaignId) -> Option<ReactionKind> {
        self.0.get(&campaign_id).copied()
    }

    /// Set or clear the user's kind for a campaign
    pub fn set(&mut self, campaign_id: CampaignId, kind: Option<ReactionKind>) {
        match kind {
            Some(kind) => {
                self.0.insert(campaign_id, kind);
            }
            None => {
                self.0.remove(&campaign_id);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CampaignId, &ReactionKind)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Aggregate and user index, always replaced or adjusted together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReactionState {
    pub aggregate: ReactionAggregate,
    pub user_index: UserReactionIndex,
}

impl ReactionState {
    /// Build state from the grouped-count query and the user's own rows
    pub fn from_rows(
        campaign_ids: &[CampaignId],
        counts: Vec<ReactionCount>,
        mine: Vec<UserReaction>,
    ) -> Self {
        let mut state = Self::default();
        state.aggregate.zero_fill(campaign_ids.iter().copied());
        for row in counts {
            state.aggregate.set(row.campaign_id, row.kind, row.count);
        }
        for row in mine {
            state.user_index.set(row.campaign_id, Some(row.kind));
        }
        state
    }

    /// Build state by grouping raw reaction rows locally
    pub fn from_scan(campaign_ids: &[CampaignId], rows: Vec<Reaction>, user_id: UserId) -> Self {
        let mut state = Self::default();
        state.aggregate.zero_fill(campaign_ids.iter().copied());
        for row in rows {
            state.aggregate.increment(row.campaign_id, row.kind);
            if row.user_id == user_id {
                state.user_index.set(row.campaign_id, Some(row.kind));
            }
        }
        state
    }
}

/// What the UI reads: the current state plus a loading flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReactionSnapshot {
    pub user_index: UserReactionIndex,
    pub aggregate: ReactionAggregate,
    pub is_loading: bool,
}
