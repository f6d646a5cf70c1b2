//! Storefront domain types and logic for VogueVault.
//!
//! This crate provides the shopper-facing half of a fashion storefront:
//!
//! - **Catalog**: read-only products, categories, facet options
//! - **Search**: text search with facet filters and sorting
//! - **Cart**: persisted cart lines, totals, checkout pricing
//! - **Wishlist**: persisted saved products
//! - **Checkout**: address and card forms, checkout flow, orders
//!
//! Lists are persisted through `vault-store` slots. A [`Storefront`] ties a
//! catalog and the stores of one storage together.
//!
//! # Example
//!
//! ```rust,ignore
//! use vault_commerce::prelude::*;
//! use vault_store::Storage;
//!
//! let catalog = Catalog::load("data/products.json")?;
//! let shop = Storefront::new(catalog, &Storage::in_memory(), &StorefrontConfig::default());
//!
//! shop.add_product_to_cart(ProductId::new(7), 2, "M", "Black").await?;
//! let view = shop.cart_view().await;
//! println!("{} items, {}", view.item_count(), view.total().display());
//!
//! let order = shop.place_order(&address, &card).await?;
//! println!("Order {}", order.id);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod enrich;
pub mod search;
pub mod storefront;
pub mod wishlist;

pub use error::{CommerceError, FieldErrors};
pub use ids::*;
pub use money::Money;
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, FieldErrors};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, FilterOptions, PriceRange, Product, ProductSource};

    // Cart
    pub use crate::cart::{
        CartLine, CartLineKey, CartPatch, CartStore, CartView, CheckoutTotals, PricingPolicy,
        MAX_LINE_QUANTITY,
    };

    // Wishlist
    pub use crate::wishlist::{WishlistEntry, WishlistStore, WishlistView};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, NewOrder, Order, OrderItem, OrderStatus, OrderStore,
        PaymentDetails, PaymentReference, ShippingAddress,
    };

    // Search
    pub use crate::search::{SearchFilters, SortOption};

    pub use crate::config::StorefrontConfig;
    pub use crate::enrich::{enrich, Enriched, ProductRef};
    pub use crate::storefront::Storefront;
}
