//! `storekeep-core`: shared building blocks for the catalog maintenance crates.
//!
//! This crate contains **pure** primitives (no IO, no storage, no HTTP).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::{OperatorId, ProductId};
