//! Catalog maintenance service (application-level orchestration).
//!
//! Two operator-triggered batch operations over the host catalog:
//!
//! ```text
//! duplicate cleanup: fetch candidates → find_duplicates (pure) → remove_product per id
//! image review:      fetch image-less → select_for_review (pure) → set_product_status per id
//! ```
//!
//! Mutations are **best-effort**: applied one record at a time in the order the
//! domain logic emits them. A failure on one record is logged and recorded, and
//! the run moves on. Nothing is rolled back.
//!
//! This module contains no IO itself; it composes the catalog store traits.

use serde::Serialize;
use thiserror::Error;

use storekeep_catalog::{find_duplicates, select_for_review, DedupReport, ProductStatus};
use storekeep_core::ProductId;

use crate::catalog_store::{CatalogMutation, CatalogQuery, StoreError};

/// Tunables for the maintenance operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceConfig {
    /// Statuses scanned by duplicate cleanup (trash is never meaningful here).
    pub dedup_statuses: Vec<ProductStatus>,
    /// Status assigned to products flagged by image review.
    pub review_status: ProductStatus,
    /// Maximum number of products fetched per image-review run (`None` = all).
    pub review_batch_limit: Option<usize>,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            dedup_statuses: ProductStatus::DEDUP_DEFAULT.to_vec(),
            review_status: ProductStatus::Pending,
            review_batch_limit: Some(1000),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaintenanceError {
    /// The host catalog is not in a state where maintenance can run.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Reading the catalog failed; nothing was mutated.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for MaintenanceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(msg) => MaintenanceError::Precondition(msg),
            other => MaintenanceError::Store(other),
        }
    }
}

/// A single mutation that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedMutation {
    pub id: ProductId,
    pub reason: String,
}

/// Result of a duplicate cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    /// Products actually moved to trash.
    pub trashed: usize,
    pub failed: Vec<FailedMutation>,
}

/// Result of an image review run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    /// Products actually moved to the review status.
    pub updated: usize,
    pub failed: Vec<FailedMutation>,
}

/// Maintenance operations over a host catalog `S`.
#[derive(Debug)]
pub struct CatalogMaintenance<S> {
    store: S,
    config: MaintenanceConfig,
}

impl<S> CatalogMaintenance<S> {
    pub fn new(store: S, config: MaintenanceConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> CatalogMaintenance<S>
where
    S: CatalogQuery + CatalogMutation,
{
    /// Compute what a cleanup would remove, without mutating anything.
    pub fn preview_duplicates(&self) -> Result<DedupReport, MaintenanceError> {
        self.store.ensure_available()?;
        let candidates = self.store.fetch_candidate_products(&self.config.dedup_statuses)?;
        Ok(find_duplicates(&candidates))
    }

    /// Trash every duplicate except the oldest record of each group.
    pub fn run_duplicate_cleanup(&self) -> Result<CleanupOutcome, MaintenanceError> {
        let report = self.preview_duplicates()?;

        tracing::info!(
            scanned = report.scanned,
            groups = report.groups.len(),
            removals = report.removed_count,
            "duplicate cleanup started"
        );

        let mut outcome = CleanupOutcome::default();
        for id in report.removals {
            match self.store.remove_product(id) {
                Ok(()) => outcome.trashed += 1,
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "failed to trash duplicate product");
                    outcome.failed.push(FailedMutation {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            trashed = outcome.trashed,
            failed = outcome.failed.len(),
            "duplicate cleanup finished"
        );

        Ok(outcome)
    }

    /// Move published products without a primary image into review.
    pub fn run_image_review(&self) -> Result<ReviewOutcome, MaintenanceError> {
        self.store.ensure_available()?;
        let records = self
            .store
            .fetch_products_without_primary_image(self.config.review_batch_limit)?;
        let selected = select_for_review(&records);

        tracing::info!(
            fetched = records.len(),
            selected = selected.len(),
            review_status = %self.config.review_status,
            "image review started"
        );

        let mut outcome = ReviewOutcome::default();
        for id in selected {
            match self.store.set_product_status(id, self.config.review_status) {
                Ok(()) => outcome.updated += 1,
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "failed to move product into review");
                    outcome.failed.push(FailedMutation {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            updated = outcome.updated,
            failed = outcome.failed.len(),
            "image review finished"
        );

        Ok(outcome)
    }
}
