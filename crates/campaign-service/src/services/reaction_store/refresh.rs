//! Debounced reconciling refresh
//!
//! Every confirmed write asks for a refresh after the configured delay. Each
//! request bumps a generation counter; a sleeping task only fetches if no
//! newer request arrived meanwhile, so a burst of clicks costs one fetch.
//! Tasks hold a weak handle and exit quietly once the store is gone.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use super::Inner;

impl Inner {
    pub(super) fn schedule_refresh(self: &Arc<Self>) {
        let generation = self.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.ctx.settings().refresh_delay;
        let store = Arc::downgrade(self);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(inner) = store.upgrade() else {
                return;
            };
            if inner.refresh_generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "Refresh superseded by a newer request");
                return;
            }
            if let Err(err) = inner.fetch().await {
                warn!(error = %err, "Scheduled reaction refresh failed");
            }
        });
    }
}
