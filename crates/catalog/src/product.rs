use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{DomainError, ProductId};

/// Product status as reported by the host catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Publish,
    Pending,
    Draft,
    Private,
    Trash,
}

impl ProductStatus {
    /// Statuses scanned by duplicate cleanup unless configured otherwise.
    pub const DEDUP_DEFAULT: [ProductStatus; 4] = [
        ProductStatus::Publish,
        ProductStatus::Pending,
        ProductStatus::Draft,
        ProductStatus::Private,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Publish => "publish",
            ProductStatus::Pending => "pending",
            ProductStatus::Draft => "draft",
            ProductStatus::Private => "private",
            ProductStatus::Trash => "trash",
        }
    }

    pub fn is_trashed(&self) -> bool {
        *self == ProductStatus::Trash
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "publish" | "published" => Ok(ProductStatus::Publish),
            "pending" => Ok(ProductStatus::Pending),
            "draft" => Ok(ProductStatus::Draft),
            "private" => Ok(ProductStatus::Private),
            "trash" | "trashed" => Ok(ProductStatus::Trash),
            other => Err(DomainError::validation(format!(
                "unknown product status '{other}' (expected one of: publish, pending, draft, private, trash)"
            ))),
        }
    }
}

/// Snapshot of a catalog product, as fetched from the host.
///
/// Records are transient: they are re-read from the host on every run and
/// never cached between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: ProductStatus,
    /// Reference to the primary (featured) image, if any.
    #[serde(default)]
    pub primary_image: Option<String>,
}

impl ProductRecord {
    /// New published record with no SKU and no image.
    pub fn new(id: ProductId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            sku: None,
            created_at,
            status: ProductStatus::Publish,
            primary_image: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_primary_image(mut self, image: impl Into<String>) -> Self {
        self.primary_image = Some(image.into());
        self
    }

    /// Total creation order key: timestamp first, host id as tie-break.
    pub fn created_order(&self) -> (DateTime<Utc>, ProductId) {
        (self.created_at, self.id)
    }

    /// A blank image reference counts as "no image".
    pub fn has_primary_image(&self) -> bool {
        self.primary_image
            .as_deref()
            .is_some_and(|image| !image.trim().is_empty())
    }
}
