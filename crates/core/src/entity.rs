//! Records the stores address by a typed id.

use crate::DomainError;

pub trait Entity {
    /// Model name used in lookup errors (e.g. `User`).
    const NAME: &'static str;

    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Lookup failure for `id`, worded the same for every model.
    fn not_found(id: &Self::Id) -> DomainError {
        DomainError::not_found(format!("Entity not found: {} with id \"{id}\"", Self::NAME))
    }
}
