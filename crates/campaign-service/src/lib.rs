//! # campaign-service
//!
//! Application layer: the per-session reaction store, its optimistic toggle
//! protocol and the context that wires it to the backend.
//!
//! ```rust,ignore
//! let (ctx, session) = ServiceContext::connect(&AppConfig::from_env()?).await?;
//! session.sign_in(&access_token)?;
//!
//! let store = ReactionStore::new(ctx);
//! store.track_many(visible_campaigns).await?;
//! store.toggle(campaign_id, ReactionKind::Fire).await?;
//! ```

pub mod services;

pub use services::{
    ReactionStore, ServiceContext, ServiceContextBuilder, StoreError, StoreResult, StoreSettings,
};
