//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in campaign-core.

mod error;
mod reaction;

pub use error::map_db_error;
pub use reaction::PgReactionRepository;
