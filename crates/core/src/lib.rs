//! `photoreport-core`: shared domain primitives.
//!
//! This crate contains **pure domain** records and identifiers (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod report;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ReportId, UserId};
pub use report::{PhotoReport, ReportPatch};
