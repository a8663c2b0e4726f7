//! Derived reaction state and the optimistic adjustments applied to it

mod adjustment;
mod aggregate;

pub use adjustment::{Adjustment, AppliedAdjustment};
pub use aggregate::{
    KindCounts, ReactionAggregate, ReactionSnapshot, ReactionState, UserReactionIndex,
};
