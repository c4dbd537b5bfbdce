//! Catalog domain module.
//!
//! Business rules for catalog maintenance, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage):
//! - [`dedup`]: group products by identity and pick one survivor per group.
//! - [`review`]: select published products that lack a primary image.

pub mod dedup;
pub mod product;
pub mod review;

pub use dedup::{find_duplicates, identity_key, DedupReport, DuplicateGroup, IdentityKey, KeyNamespace};
pub use product::{ProductRecord, ProductStatus};
pub use review::select_for_review;
