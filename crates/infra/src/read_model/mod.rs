//! Keyed record storage abstractions.

pub mod entity_store;

pub use entity_store::{EntityStore, InMemoryEntityStore};
