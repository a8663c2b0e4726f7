//! Fetching the working set
//!
//! Grouped counts and the user's own rows are queried concurrently. When
//! either fails the raw rows are scanned and recounted locally; when that
//! fails too the previous state is left alone.

use std::future::Future;
use std::time::Duration;

use futures::future::try_join;
use tracing::{debug, info, instrument, warn};

use campaign_core::traits::RepoResult;
use campaign_core::{CampaignId, DomainError, ReactionState, StoreEvent, UserId};

use super::Inner;
use crate::services::error::{StoreError, StoreResult};

/// Run a backend call under `limit`; running out of time is a failure
pub(super) async fn with_timeout<T, F>(limit: Duration, call: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| DomainError::Timeout(limit))?
}

/// Keeps `loading` accurate even if the fetch future is dropped midway
struct LoadingGuard<'a> {
    inner: &'a Inner,
}

impl<'a> LoadingGuard<'a> {
    fn new(inner: &'a Inner) -> Self {
        inner.state.lock().loading += 1;
        Self { inner }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        state.loading = state.loading.saturating_sub(1);
    }
}

impl Inner {
    /// Fetch the whole working set and replace state with the result
    #[instrument(skip(self))]
    pub(super) async fn fetch(&self) -> StoreResult<()> {
        let (campaign_ids, seq) = {
            let mut state = self.state.lock();
            state.fetch_started += 1;
            (state.working_set.clone(), state.fetch_started)
        };

        if campaign_ids.is_empty() {
            self.replace(seq, ReactionState::default());
            return Ok(());
        }

        let Some(user_id) = self.ctx.session().current_user() else {
            warn!("Reaction fetch without a signed-in user");
            return Err(StoreError::Unauthenticated);
        };

        let loaded = {
            let _loading = LoadingGuard::new(self);
            self.load(&campaign_ids, user_id).await
        };

        match loaded {
            Ok(reactions) => {
                self.replace(seq, reactions);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, campaigns = campaign_ids.len(), "Reaction fetch failed, keeping previous state");
                Err(StoreError::Fetch(err))
            }
        }
    }

    async fn load(&self, campaign_ids: &[CampaignId], user_id: UserId) -> RepoResult<ReactionState> {
        let repo = self.ctx.reaction_repo();
        let settings = self.ctx.settings();
        let limit = settings.request_timeout;

        let grouped = try_join(
            with_timeout(limit, repo.aggregate_counts(campaign_ids)),
            with_timeout(limit, repo.find_user_reactions(campaign_ids, user_id)),
        )
        .await;

        match grouped {
            Ok((counts, mine)) => Ok(ReactionState::from_rows(campaign_ids, counts, mine)),
            Err(err) if settings.fallback_scan => {
                warn!(error = %err, "Grouped reaction queries failed, scanning rows");
                let rows = with_timeout(limit, repo.find_by_campaigns(campaign_ids)).await?;
                Ok(ReactionState::from_scan(campaign_ids, rows, user_id))
            }
            Err(err) => Err(err),
        }
    }

    /// Install fetched state unless a later-started fetch already did
    pub(super) fn replace(&self, seq: u64, reactions: ReactionState) {
        let campaigns = reactions.aggregate.len();
        {
            let mut state = self.state.lock();
            if seq < state.fetch_applied {
                debug!(seq, applied = state.fetch_applied, "Discarding stale fetch");
                return;
            }
            state.fetch_applied = seq;
            state.reactions = reactions;
            // Fetched truth replaces every optimistic change still in flight
            state.toggles.clear();
        }
        info!(campaigns, "Reaction state refreshed");
        self.emit(StoreEvent::Refreshed { campaigns });
    }
}
