//! Image review selection.

use storekeep_core::ProductId;

use crate::product::{ProductRecord, ProductStatus};

/// Ids of published records without a primary image, in input order.
///
/// Hosts usually pre-filter with a query, but the check is repeated per record
/// since the image reference may have been attached in the meantime.
pub fn select_for_review(records: &[ProductRecord]) -> Vec<ProductId> {
    records
        .iter()
        .filter(|r| r.status == ProductStatus::Publish && !r.has_primary_image())
        .map(|r| r.id)
        .collect()
}
