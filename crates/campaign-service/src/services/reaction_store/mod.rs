//! Reaction store
//!
//! Per-session state for the campaigns on screen: the user's reaction per
//! campaign and the per-kind counts, fetched from the backend and adjusted
//! optimistically when the user clicks.
//!
//! The store is a cheap `Clone` handle. All state sits behind one mutex that
//! is never held across an `.await`, so an optimistic apply, its rollback and
//! a fetch replacement never interleave.

mod fetch;
mod refresh;
mod toggle;

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

use campaign_core::{AppliedAdjustment, CampaignId, ReactionSnapshot, ReactionState, StoreEvent};

use super::context::ServiceContext;
use super::error::StoreResult;

const EVENT_CAPACITY: usize = 64;

/// Handle to a session's reaction state
#[derive(Clone)]
pub struct ReactionStore {
    inner: Arc<Inner>,
}

struct Inner {
    ctx: ServiceContext,
    state: Mutex<StoreState>,
    events: broadcast::Sender<StoreEvent>,
    /// Bumped by every scheduled refresh; only the newest one runs
    refresh_generation: AtomicU64,
}

#[derive(Default)]
struct StoreState {
    working_set: Vec<CampaignId>,
    reactions: ReactionState,
    /// Fetches in flight
    loading: usize,
    /// Sequence of the most recently started fetch
    fetch_started: u64,
    /// Sequence of the fetch whose result is in `reactions`
    fetch_applied: u64,
    /// Unsettled optimistic changes per campaign, oldest first
    toggles: HashMap<CampaignId, Vec<InFlight>>,
    next_toggle: u64,
}

/// An optimistic change whose backend write has not settled
struct InFlight {
    seq: u64,
    applied: AppliedAdjustment,
    /// The write failed while a newer change was still pending
    failed: bool,
}

impl ReactionStore {
    /// Create an empty store; nothing is fetched until a campaign is tracked
    pub fn new(ctx: ServiceContext) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                ctx,
                state: Mutex::new(StoreState::default()),
                events,
                refresh_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Add a campaign to the working set, fetching if it was not tracked yet
    ///
    /// # Errors
    /// Returns the fetch error; the campaign stays tracked either way
    pub async fn track(&self, campaign_id: CampaignId) -> StoreResult<()> {
        self.track_many([campaign_id]).await
    }

    /// Add several campaigns with a single fetch
    ///
    /// # Errors
    /// Returns the fetch error; the campaigns stay tracked either way
    pub async fn track_many<I>(&self, campaign_ids: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = CampaignId>,
    {
        let added = {
            let mut state = self.inner.state.lock();
            let mut added = 0usize;
            for id in campaign_ids {
                if !state.working_set.contains(&id) {
                    state.working_set.push(id);
                    added += 1;
                }
            }
            added
        };

        if added == 0 {
            return Ok(());
        }
        debug!(added, "Tracking campaigns");
        self.inner.fetch().await
    }

    /// Remove a campaign from the working set; the next fetch drops its state
    pub fn untrack(&self, campaign_id: CampaignId) {
        let mut state = self.inner.state.lock();
        state.working_set.retain(|id| *id != campaign_id);
    }

    /// Campaigns currently tracked, in the order they were added
    pub fn working_set(&self) -> Vec<CampaignId> {
        self.inner.state.lock().working_set.clone()
    }

    /// Current state including pending optimistic changes
    pub fn snapshot(&self) -> ReactionSnapshot {
        let state = self.inner.state.lock();
        ReactionSnapshot {
            user_index: state.reactions.user_index.clone(),
            aggregate: state.reactions.aggregate.clone(),
            is_loading: state.loading > 0,
        }
    }

    /// Re-fetch the whole working set; backend truth replaces optimistic state
    ///
    /// # Errors
    /// Returns `Unauthenticated` without a signed-in user, or the fetch error
    pub async fn refresh(&self) -> StoreResult<()> {
        self.inner.fetch().await
    }

    /// Receive an event for every visible state change
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }
}

impl Inner {
    fn emit(&self, event: StoreEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for ReactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ReactionStore")
            .field("working_set", &state.working_set.len())
            .field("loading", &state.loading)
            .field("pending_toggles", &state.toggles.values().map(Vec::len).sum::<usize>())
            .finish_non_exhaustive()
    }
}
