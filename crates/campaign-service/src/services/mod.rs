//! Application services
//!
//! The reaction store and the context it is built from.

pub mod context;
pub mod error;
pub mod reaction_store;

pub use context::{ServiceContext, ServiceContextBuilder, StoreSettings};
pub use error::{StoreError, StoreResult};
pub use reaction_store::ReactionStore;
