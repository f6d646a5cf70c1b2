//! Type-safe key-value list storage for VogueVault.
//!
//! Each piece of storefront state (cart, wishlist, orders) lives in its own
//! slot as one JSON array, rewritten wholesale on every change.
//!
//! # Example
//!
//! ```rust,ignore
//! use vault_store::{ListSlot, Storage};
//!
//! let storage = Storage::open_dir(".vault/data")?;
//! let wishlist: ListSlot<WishlistEntry> = storage.slot("voguevault_wishlist");
//!
//! // Never fails: unreadable slots come back empty.
//! let entries = wishlist.read();
//!
//! // Serialized read-modify-write.
//! wishlist.update(|entries| entries.retain(|e| e.product_id != id)).await;
//! ```

mod error;
mod kv;
mod slot;

pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use slot::{ListSlot, Storage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KeyValueStore, ListSlot, MemoryStore, Storage, StoreError};
}
