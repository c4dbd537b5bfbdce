use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use storekeep_catalog::{ProductRecord, ProductStatus};
use storekeep_core::ProductId;

use super::r#trait::{CatalogMutation, CatalogQuery, StoreError};

/// In-memory catalog.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryCatalog {
    products: RwLock<BTreeMap<ProductId, ProductRecord>>,
    next_id: AtomicU64,
    available: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            available: AtomicBool::new(true),
        }
    }

    /// Allocate a fresh product id (monotonic, never reused).
    pub fn next_id(&self) -> ProductId {
        ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Insert or replace a record. Keeps `next_id` ahead of every stored id.
    pub fn insert(&self, record: ProductRecord) -> Result<(), StoreError> {
        self.next_id.fetch_max(record.id.get().saturating_add(1), Ordering::SeqCst);
        let mut map = self.write()?;
        map.insert(record.id, record);
        Ok(())
    }

    pub fn get(&self, id: ProductId) -> Option<ProductRecord> {
        self.products.read().ok()?.get(&id).cloned()
    }

    /// All records (any status), oldest first.
    pub fn list(&self) -> Vec<ProductRecord> {
        let map = match self.products.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        oldest_first(map.values().cloned().collect())
    }

    /// Toggle availability (simulates the host module being switched off).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<ProductId, ProductRecord>>, StoreError> {
        self.products
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<ProductId, ProductRecord>>, StoreError> {
        self.products
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn oldest_first(mut records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records.sort_by_key(|r| r.created_order());
    records
}

impl CatalogQuery for InMemoryCatalog {
    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory catalog is switched off".to_string()))
        }
    }

    fn fetch_candidate_products(&self, statuses: &[ProductStatus]) -> Result<Vec<ProductRecord>, StoreError> {
        let map = self.read()?;
        let matching = map
            .values()
            .filter(|r| statuses.contains(&r.status))
            .cloned()
            .collect();
        Ok(oldest_first(matching))
    }

    fn fetch_products_without_primary_image(&self, limit: Option<usize>) -> Result<Vec<ProductRecord>, StoreError> {
        let map = self.read()?;
        let matching = map
            .values()
            .filter(|r| r.status == ProductStatus::Publish && !r.has_primary_image())
            .cloned()
            .collect();

        let mut records = oldest_first(matching);
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }
}

impl CatalogMutation for InMemoryCatalog {
    fn remove_product(&self, id: ProductId) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.status = ProductStatus::Trash;
        Ok(())
    }

    fn set_product_status(&self, id: ProductId, status: ProductStatus) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.status = status;
        Ok(())
    }
}
