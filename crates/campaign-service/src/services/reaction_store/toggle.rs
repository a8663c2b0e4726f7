//! The toggle protocol
//!
//! A click is applied to local state inside `toggle` itself, before any
//! await. The returned future performs the backend write and either confirms
//! the change (scheduling a reconciling refresh) or undoes it.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use tracing::{info, warn};

use campaign_core::{Adjustment, CampaignId, ReactionKind, StoreEvent, UserId};

use super::fetch::with_timeout;
use super::{InFlight, Inner, ReactionStore, StoreState};
use crate::services::error::{StoreError, StoreResult};

/// An optimistic change waiting on its backend write
struct PendingToggle {
    adjustment: Adjustment,
    /// Per-campaign toggle sequence at apply time
    seq: u64,
}

/// Outcome of undoing a failed write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rollback {
    /// The change and `undone - 1` older failed changes beneath it were reverted
    Reverted { undone: usize },
    /// Newer changes are still pending; the change is reverted once they fail
    Deferred,
    /// A confirmed write or a fetch already settled the change
    Superseded,
}

impl ReactionStore {
    /// Click `kind` on a campaign
    ///
    /// Clicking the active kind removes the reaction; any other kind replaces
    /// it. The change is visible through [`snapshot`](Self::snapshot) as soon
    /// as this returns. The future resolves to the kind the user now has.
    ///
    /// Without a signed-in user nothing changes and the future resolves to
    /// `Unauthenticated`. A campaign that is not tracked can be toggled; it is
    /// not added to the working set.
    pub fn toggle(
        &self,
        campaign_id: CampaignId,
        kind: ReactionKind,
    ) -> BoxFuture<'static, StoreResult<Option<ReactionKind>>> {
        let Some(user_id) = self.inner.ctx.session().current_user() else {
            warn!(campaign_id = %campaign_id, "Toggle without a signed-in user");
            return future::ready(Err(StoreError::Unauthenticated)).boxed();
        };

        let pending = self.inner.apply_optimistic(campaign_id, kind);
        let inner = Arc::clone(&self.inner);
        async move { inner.commit(user_id, pending).await }.boxed()
    }
}

impl Inner {
    fn apply_optimistic(&self, campaign_id: CampaignId, kind: ReactionKind) -> PendingToggle {
        let pending = {
            let mut state = self.state.lock();
            let adjustment = Adjustment::toggle(&state.reactions, campaign_id, kind);
            let applied = adjustment.apply(&mut state.reactions);
            state.next_toggle += 1;
            let seq = state.next_toggle;
            state.toggles.entry(campaign_id).or_default().push(InFlight {
                seq,
                applied,
                failed: false,
            });
            PendingToggle { adjustment, seq }
        };

        self.emit(StoreEvent::Optimistic {
            campaign_id,
            kind: pending.adjustment.next,
        });
        pending
    }

    async fn commit(
        self: &Arc<Self>,
        user_id: UserId,
        pending: PendingToggle,
    ) -> StoreResult<Option<ReactionKind>> {
        let adjustment = pending.adjustment;
        let campaign_id = adjustment.campaign_id;
        let repo = self.ctx.reaction_repo();
        let limit = self.ctx.settings().request_timeout;

        let written = match adjustment.next {
            Some(kind) => with_timeout(limit, repo.upsert(campaign_id, user_id, kind)).await,
            None => with_timeout(limit, repo.delete(campaign_id, user_id)).await,
        };

        let source = match written {
            Ok(()) => {
                self.confirm(campaign_id, pending.seq);
                info!(
                    campaign_id = %campaign_id,
                    kind = ?adjustment.next,
                    "Reaction saved"
                );
                self.emit(StoreEvent::Confirmed { campaign_id });
                self.schedule_refresh();
                return Ok(adjustment.next);
            }
            Err(source) => source,
        };

        match self.rollback(campaign_id, pending.seq) {
            Rollback::Reverted { undone } => {
                warn!(
                    campaign_id = %campaign_id,
                    undone,
                    error = %source,
                    "Reaction write failed, rolled back"
                );
                self.emit(StoreEvent::RolledBack { campaign_id });
                Err(StoreError::RolledBack {
                    campaign_id,
                    source,
                })
            }
            Rollback::Deferred => {
                warn!(
                    campaign_id = %campaign_id,
                    error = %source,
                    "Reaction write failed behind newer changes, rollback deferred"
                );
                Err(StoreError::Superseded {
                    campaign_id,
                    source,
                })
            }
            Rollback::Superseded => {
                warn!(
                    campaign_id = %campaign_id,
                    error = %source,
                    "Reaction write failed after state was settled, refreshing instead"
                );
                self.schedule_refresh();
                Err(StoreError::Superseded {
                    campaign_id,
                    source,
                })
            }
        }
    }

    /// Undo the failed change `seq` on `campaign_id`
    ///
    /// Only the newest in-flight change is reverted directly. An older one is
    /// marked failed and reverted later, newest first, when every change
    /// above it has failed too.
    fn rollback(&self, campaign_id: CampaignId, seq: u64) -> Rollback {
        let mut guard = self.state.lock();
        let StoreState {
            toggles, reactions, ..
        } = &mut *guard;

        let Some(stack) = toggles.get_mut(&campaign_id) else {
            return Rollback::Superseded;
        };
        let Some(pos) = stack.iter().position(|t| t.seq == seq) else {
            return Rollback::Superseded;
        };
        if pos + 1 < stack.len() {
            stack[pos].failed = true;
            return Rollback::Deferred;
        }

        let mut undone = 0;
        while let Some(top) = stack.last() {
            if undone > 0 && !top.failed {
                break;
            }
            top.applied.revert(reactions);
            stack.pop();
            undone += 1;
        }
        if stack.is_empty() {
            toggles.remove(&campaign_id);
        }
        Rollback::Reverted { undone }
    }

    /// Settle `seq` and every older change on `campaign_id`
    ///
    /// The confirmed write is the newest the backend has seen, so older
    /// changes no longer have anything to restore.
    fn confirm(&self, campaign_id: CampaignId, seq: u64) {
        let mut state = self.state.lock();
        let Some(stack) = state.toggles.get_mut(&campaign_id) else {
            return;
        };
        if let Some(pos) = stack.iter().position(|t| t.seq == seq) {
            stack.drain(..=pos);
        }
        if stack.is_empty() {
            state.toggles.remove(&campaign_id);
        }
    }
}
