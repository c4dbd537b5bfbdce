//! Duplicate detection for catalog products.
//!
//! Model:
//! - Every record gets an [`IdentityKey`]: its trimmed, lowercased SKU, or its
//!   trimmed, lowercased title when the SKU is blank.
//! - Records sharing a key form a group, in input order.
//! - The first record of each group survives; the rest are reported for removal.
//!
//! The engine trusts the caller's ordering (ascending creation order) to decide
//! which record is "oldest" and never re-sorts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use storekeep_core::ProductId;

use crate::product::ProductRecord;

/// Which attribute an identity key was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyNamespace {
    Sku,
    Title,
}

/// Identity of a product for duplicate detection (derived, never stored).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    pub namespace: KeyNamespace,
    pub value: String,
}

impl IdentityKey {
    pub fn sku(value: &str) -> Self {
        Self {
            namespace: KeyNamespace::Sku,
            value: value.trim().to_lowercase(),
        }
    }

    pub fn title(value: &str) -> Self {
        Self {
            namespace: KeyNamespace::Title,
            value: value.trim().to_lowercase(),
        }
    }
}

impl core::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let ns = match self.namespace {
            KeyNamespace::Sku => "sku",
            KeyNamespace::Title => "title",
        };
        write!(f, "{ns}::{}", self.value)
    }
}

/// Derive the identity key of a record.
///
/// A non-blank SKU always wins. Otherwise the title is used, even when it is
/// blank too, so all records with neither SKU nor title share one key.
pub fn identity_key(record: &ProductRecord) -> IdentityKey {
    match record.sku.as_deref().map(str::trim) {
        Some(sku) if !sku.is_empty() => IdentityKey::sku(sku),
        _ => IdentityKey::title(&record.title),
    }
}

/// A set of records sharing one identity key (only materialized for 2+ members).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub key: IdentityKey,
    /// Oldest record; kept.
    pub survivor: ProductId,
    /// Remaining records in input order; to be removed.
    pub duplicates: Vec<ProductId>,
}

/// Outcome of a duplicate scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupReport {
    /// Number of records examined.
    pub scanned: usize,
    /// Ids to remove, grouped by first-seen key, input order within each group.
    pub removals: Vec<ProductId>,
    /// Always `removals.len()`.
    pub removed_count: usize,
    pub groups: Vec<DuplicateGroup>,
}

impl DedupReport {
    pub fn is_clean(&self) -> bool {
        self.removals.is_empty()
    }
}

/// Group `records` by identity and report every non-survivor for removal.
///
/// Pure and deterministic: no IO, no errors. Empty strings, repeated ids and
/// empty input are all accepted.
pub fn find_duplicates(records: &[ProductRecord]) -> DedupReport {
    // Insertion-ordered grouping: `index` maps a key to its slot in `buckets`.
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut buckets: Vec<(IdentityKey, Vec<ProductId>)> = Vec::new();

    for record in records {
        let key = identity_key(record);
        match index.get(&key) {
            Some(&slot) => buckets[slot].1.push(record.id),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![record.id]));
            }
        }
    }

    let mut groups = Vec::new();
    let mut removals = Vec::new();

    for (key, members) in buckets {
        let Some((&survivor, rest)) = members.split_first() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }

        removals.extend_from_slice(rest);
        groups.push(DuplicateGroup {
            key,
            survivor,
            duplicates: rest.to_vec(),
        });
    }

    DedupReport {
        scanned: records.len(),
        removed_count: removals.len(),
        removals,
        groups,
    }
}
