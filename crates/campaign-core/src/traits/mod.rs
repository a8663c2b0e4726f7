//! Ports implemented by infrastructure crates

mod repositories;

pub use repositories::{ReactionRepository, RepoResult, SessionProvider};
