use chrono::{DateTime, Utc};
use serde::Deserialize;

use storekeep_auth::MaintenanceAction;
use storekeep_catalog::{ProductRecord, ProductStatus};
use storekeep_core::{DomainError, ProductId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct IssueTokenRequest {
    pub action: MaintenanceAction,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub sku: Option<String>,
    pub status: Option<String>,
    pub primary_image: Option<String>,
    /// Defaults to the time of the request.
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateProductRequest {
    pub fn into_record(self, id: ProductId, now: DateTime<Utc>) -> Result<ProductRecord, DomainError> {
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse::<ProductStatus>()?,
            None => ProductStatus::Publish,
        };

        Ok(ProductRecord {
            id,
            title: self.title,
            sku: self.sku,
            created_at: self.created_at.unwrap_or(now),
            status,
            primary_image: self.primary_image,
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(record: ProductRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "title": record.title,
        "sku": record.sku,
        "status": record.status,
        "created_at": record.created_at.to_rfc3339(),
        "has_primary_image": record.has_primary_image(),
    })
}
