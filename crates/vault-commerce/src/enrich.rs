//! Joining stored entries with catalog products.

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductSource};
use crate::cart::CartLine;
use crate::ids::ProductId;
use crate::wishlist::WishlistEntry;

/// A stored entry that refers to a product.
pub trait ProductRef {
    fn product_id(&self) -> ProductId;
}

impl ProductRef for CartLine {
    fn product_id(&self) -> ProductId {
        self.product_id
    }
}

impl ProductRef for WishlistEntry {
    fn product_id(&self) -> ProductId {
        self.product_id
    }
}

/// A stored entry together with its product.
///
/// Serializes as the entry's own fields plus `product`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enriched<E> {
    #[serde(flatten)]
    pub entry: E,
    pub product: Product,
}

/// Resolve every entry's product concurrently.
///
/// Entries whose product cannot be resolved are dropped with a warning;
/// one failed lookup never affects the others. Order is preserved.
pub async fn enrich<E>(entries: Vec<E>, source: &dyn ProductSource) -> Vec<Enriched<E>>
where
    E: ProductRef,
{
    let lookups = entries.into_iter().map(move |entry| async move {
        let result = source.product(entry.product_id()).await;
        (entry, result)
    });

    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|(entry, result)| match result {
            Ok(product) => Some(Enriched { entry, product }),
            Err(e) => {
                tracing::warn!(
                    product_id = %entry.product_id(),
                    error = %e,
                    "Dropping entry for unresolvable product"
                );
                None
            }
        })
        .collect()
}
