//! Host catalog boundary.
//!
//! The catalog itself (products, statuses, images) is owned by the host
//! platform. This module defines what the maintenance service needs from it:
//! a query side and a mutation side, plus an in-memory implementation for
//! tests/dev.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryCatalog;
pub use r#trait::{CatalogMutation, CatalogQuery, StoreError};
