//! Test fixtures
//!
//! `InMemoryReactionRepository` mirrors the `campaign_reactions` table: one
//! row per `(campaign_id, user_id)`, upsert replaces. Individual queries can
//! be made to fail or to respond slowly.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use campaign_core::entities::{Reaction, ReactionCount, UserReaction};
use campaign_core::traits::{ReactionRepository, RepoResult};
use campaign_core::{CampaignId, DomainError, ReactionKind, UserId};

/// Which calls should fail
#[derive(Debug, Default)]
struct FailurePlan {
    aggregate: bool,
    user_rows: bool,
    scan: bool,
    all_writes: bool,
    writes: HashSet<CampaignId>,
}

/// In-memory stand-in for the hosted reactions table
#[derive(Default)]
pub struct InMemoryReactionRepository {
    rows: DashMap<(CampaignId, UserId), Reaction>,
    failures: Mutex<FailurePlan>,
    latency: Mutex<Option<Duration>>,
    aggregate_calls: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryReactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row directly, as another client would
    pub fn seed(&self, campaign_id: CampaignId, user_id: UserId, kind: ReactionKind) {
        self.rows
            .insert((campaign_id, user_id), Reaction::new(campaign_id, user_id, kind));
    }

    /// Rows stored for one `(campaign, user)` pair
    pub fn row_count(&self, campaign_id: CampaignId, user_id: UserId) -> usize {
        self.rows
            .iter()
            .filter(|row| row.campaign_id == campaign_id && row.user_id == user_id)
            .count()
    }

    pub fn stored_kind(&self, campaign_id: CampaignId, user_id: UserId) -> Option<ReactionKind> {
        self.rows.get(&(campaign_id, user_id)).map(|row| row.kind)
    }

    pub fn fail_aggregate(&self, fail: bool) {
        self.failures.lock().aggregate = fail;
    }

    pub fn fail_user_rows(&self, fail: bool) {
        self.failures.lock().user_rows = fail;
    }

    pub fn fail_scan(&self, fail: bool) {
        self.failures.lock().scan = fail;
    }

    pub fn fail_all_writes(&self, fail: bool) {
        self.failures.lock().all_writes = fail;
    }

    pub fn fail_writes_for(&self, campaign_id: CampaignId) {
        self.failures.lock().writes.insert(campaign_id);
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    /// Number of grouped-count queries served (one per successful-path fetch)
    pub fn aggregate_calls(&self) -> usize {
        self.aggregate_calls.load(Ordering::SeqCst)
    }

    /// Number of upserts and deletes that reached the table
    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn unavailable(what: &str) -> DomainError {
        DomainError::BackendError(format!("{what} unavailable"))
    }

    fn check_write(&self, campaign_id: CampaignId) -> RepoResult<()> {
        let plan = self.failures.lock();
        if plan.all_writes || plan.writes.contains(&campaign_id) {
            return Err(Self::unavailable("write"));
        }
        Ok(())
    }

    fn rows_in(&self, campaign_ids: &[CampaignId]) -> Vec<Reaction> {
        self.rows
            .iter()
            .filter(|row| campaign_ids.contains(&row.campaign_id))
            .map(|row| row.value().clone())
            .collect()
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactionRepository {
    async fn aggregate_counts(&self, campaign_ids: &[CampaignId]) -> RepoResult<Vec<ReactionCount>> {
        self.delay().await;
        if self.failures.lock().aggregate {
            return Err(Self::unavailable("aggregate query"));
        }
        self.aggregate_calls.fetch_add(1, Ordering::SeqCst);

        let mut grouped: BTreeMap<(CampaignId, ReactionKind), u32> = BTreeMap::new();
        for row in self.rows_in(campaign_ids) {
            *grouped.entry((row.campaign_id, row.kind)).or_default() += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|((campaign_id, kind), count)| ReactionCount::new(campaign_id, kind, count))
            .collect())
    }

    async fn find_user_reactions(
        &self,
        campaign_ids: &[CampaignId],
        user_id: UserId,
    ) -> RepoResult<Vec<UserReaction>> {
        self.delay().await;
        if self.failures.lock().user_rows {
            return Err(Self::unavailable("user reaction query"));
        }
        Ok(self
            .rows_in(campaign_ids)
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(UserReaction::from)
            .collect())
    }

    async fn find_by_campaigns(&self, campaign_ids: &[CampaignId]) -> RepoResult<Vec<Reaction>> {
        self.delay().await;
        if self.failures.lock().scan {
            return Err(Self::unavailable("row scan"));
        }
        Ok(self.rows_in(campaign_ids))
    }

    async fn upsert(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        self.delay().await;
        self.check_write(campaign_id)?;
        self.writes.fetch_add(1, Ordering::SeqCst);

        self.rows
            .entry((campaign_id, user_id))
            .and_modify(|row| row.change_kind(kind))
            .or_insert_with(|| Reaction::new(campaign_id, user_id, kind));
        debug!(campaign_id = %campaign_id, kind = %kind, "In-memory upsert");
        Ok(())
    }

    async fn delete(&self, campaign_id: CampaignId, user_id: UserId) -> RepoResult<()> {
        self.delay().await;
        self.check_write(campaign_id)?;
        self.writes.fetch_add(1, Ordering::SeqCst);

        self.rows.remove(&(campaign_id, user_id));
        Ok(())
    }
}
