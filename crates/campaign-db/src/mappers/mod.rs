//! Entity to model mappers
//!
//! Conversions between domain entities (campaign-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `ReactionUpsert`: Prepare entity data for the upsert statement

mod reaction;

pub use reaction::{campaign_uuids, ReactionUpsert};
