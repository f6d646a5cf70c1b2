//! Wishlist store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vault_store::ListSlot;

use crate::enrich::Enriched;
use crate::ids::ProductId;

/// One saved product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub added_at: DateTime<Utc>,
}

impl WishlistEntry {
    /// Create an entry stamped with the current time.
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            added_at: Utc::now(),
        }
    }
}

/// Wishlist entries joined with their products.
pub type WishlistView = Vec<Enriched<WishlistEntry>>;

/// Saved products kept in one storage slot, at most one entry per product.
#[derive(Debug, Clone)]
pub struct WishlistStore {
    slot: ListSlot<WishlistEntry>,
}

impl WishlistStore {
    pub fn new(slot: ListSlot<WishlistEntry>) -> Self {
        Self { slot }
    }

    /// Every entry, oldest first.
    pub fn get_all(&self) -> Vec<WishlistEntry> {
        self.slot.read()
    }

    /// Save a product; no-op if it is already saved.
    pub async fn add(&self, product_id: ProductId) -> Vec<WishlistEntry> {
        self.slot
            .update(|entries| {
                if !entries.iter().any(|e| e.product_id == product_id) {
                    entries.push(WishlistEntry::new(product_id));
                }
                entries.clone()
            })
            .await
    }

    /// Forget a product.
    pub async fn remove(&self, product_id: ProductId) -> Vec<WishlistEntry> {
        self.slot
            .update(|entries| {
                entries.retain(|e| e.product_id != product_id);
                entries.clone()
            })
            .await
    }

    /// Add if absent, remove if present. Returns whether the product is
    /// saved afterwards.
    pub async fn toggle(&self, product_id: ProductId) -> bool {
        let saved = self
            .slot
            .update(|entries| {
                let before = entries.len();
                entries.retain(|e| e.product_id != product_id);
                if entries.len() == before {
                    entries.push(WishlistEntry::new(product_id));
                    true
                } else {
                    false
                }
            })
            .await;

        tracing::debug!(product_id = %product_id, saved, "Wishlist toggled");
        saved
    }

    /// Remove every entry.
    pub async fn clear(&self) {
        self.slot.replace(Vec::new()).await;
    }

    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.get_all().iter().any(|e| e.product_id == product_id)
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }
}
