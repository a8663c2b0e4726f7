//! Events emitted by the reaction store

mod store_event;

pub use store_event::StoreEvent;
