//! Infrastructure layer: persistence adapters behind the domain's store traits.

pub mod read_model;
pub mod reports;
pub mod users;

pub use read_model::{EntityStore, InMemoryEntityStore};
pub use reports::InMemoryReportStore;
pub use users::InMemoryUserStore;
