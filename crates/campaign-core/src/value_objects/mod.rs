//! Value objects - immutable types that represent domain concepts

mod ids;
mod reaction_kind;

pub use ids::{CampaignId, IdParseError, UserId};
pub use reaction_kind::ReactionKind;
