use std::sync::Arc;

use thiserror::Error;

use storekeep_catalog::{ProductRecord, ProductStatus};
use storekeep_core::ProductId;

/// Catalog operation error.
///
/// These are **infrastructure errors** reported by the host; domain decisions
/// never produce them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The host catalog is not active (e.g. the commerce module is disabled).
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The record changed underneath us (concurrent modification).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Backend(String),
}

/// Read side of the host catalog.
///
/// Implementations must:
/// - return candidate records sorted ascending by creation order
///   (`ProductRecord::created_order`)
/// - perform status filtering themselves
pub trait CatalogQuery: Send + Sync {
    /// Fail with [`StoreError::Unavailable`] when the host cannot serve requests.
    fn ensure_available(&self) -> Result<(), StoreError>;

    /// Records whose status is one of `statuses`, oldest first.
    fn fetch_candidate_products(&self, statuses: &[ProductStatus]) -> Result<Vec<ProductRecord>, StoreError>;

    /// Published records lacking a primary image, oldest first, at most `limit`.
    fn fetch_products_without_primary_image(&self, limit: Option<usize>) -> Result<Vec<ProductRecord>, StoreError>;
}

/// Write side of the host catalog. Each call mutates exactly one record.
pub trait CatalogMutation: Send + Sync {
    /// Soft-delete (trash) a product. Removing an already-trashed product succeeds.
    fn remove_product(&self, id: ProductId) -> Result<(), StoreError>;

    fn set_product_status(&self, id: ProductId, status: ProductStatus) -> Result<(), StoreError>;
}

impl<S> CatalogQuery for Arc<S>
where
    S: CatalogQuery + ?Sized,
{
    fn ensure_available(&self) -> Result<(), StoreError> {
        (**self).ensure_available()
    }

    fn fetch_candidate_products(&self, statuses: &[ProductStatus]) -> Result<Vec<ProductRecord>, StoreError> {
        (**self).fetch_candidate_products(statuses)
    }

    fn fetch_products_without_primary_image(&self, limit: Option<usize>) -> Result<Vec<ProductRecord>, StoreError> {
        (**self).fetch_products_without_primary_image(limit)
    }
}

impl<S> CatalogMutation for Arc<S>
where
    S: CatalogMutation + ?Sized,
{
    fn remove_product(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).remove_product(id)
    }

    fn set_product_status(&self, id: ProductId, status: ProductStatus) -> Result<(), StoreError> {
        (**self).set_product_status(id, status)
    }
}
