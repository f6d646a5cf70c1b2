//! Storefront configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cart::PricingPolicy;

/// Default cart slot key.
pub const DEFAULT_CART_SLOT: &str = "voguevault_cart";
/// Default wishlist slot key.
pub const DEFAULT_WISHLIST_SLOT: &str = "voguevault_wishlist";
/// Default order slot key.
pub const DEFAULT_ORDERS_SLOT: &str = "voguevault_orders";
/// Default order id prefix.
pub const DEFAULT_BRAND_TAG: &str = "VV";

/// Storefront configuration. Every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorefrontConfig {
    pub storage: StorageConfig,
    pub orders: OrdersConfig,
    pub pricing: PricingPolicy,
    pub catalog: CatalogConfig,
}

/// Where and under which keys lists are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for file-backed slots. The library never opens it; the CLI
    /// does, falling back to `.vault` when unset.
    pub dir: Option<PathBuf>,
    pub cart_slot: String,
    pub wishlist_slot: String,
    pub orders_slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            cart_slot: DEFAULT_CART_SLOT.to_string(),
            wishlist_slot: DEFAULT_WISHLIST_SLOT.to_string(),
            orders_slot: DEFAULT_ORDERS_SLOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrdersConfig {
    /// Prefix of generated order ids.
    pub brand_tag: String,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            brand_tag: DEFAULT_BRAND_TAG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON product file.
    pub path: Option<PathBuf>,
}
