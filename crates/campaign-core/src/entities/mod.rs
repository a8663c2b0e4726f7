//! Domain entities - core business objects

mod campaign;
mod reaction;

pub use campaign::Campaign;
pub use reaction::{Reaction, ReactionCount, UserReaction};
