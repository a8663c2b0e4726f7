//! # campaign-core
//!
//! Domain layer for campaign reactions: identifiers, reaction kinds, entities,
//! the derived reaction state with its optimistic adjustments, the test-data
//! classifier, store events, and the ports the backend adapters implement.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod state;
pub mod test_data;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Campaign, Reaction, ReactionCount, UserReaction};
pub use error::DomainError;
pub use events::StoreEvent;
pub use state::{
    Adjustment, AppliedAdjustment, KindCounts, ReactionAggregate, ReactionSnapshot,
    ReactionState, UserReactionIndex,
};
pub use test_data::{classify, render, TestDataView};
pub use traits::{ReactionRepository, RepoResult, SessionProvider};
pub use value_objects::{CampaignId, IdParseError, ReactionKind, UserId};
