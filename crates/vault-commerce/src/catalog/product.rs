//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Loaded once from static data and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    #[serde(rename = "Id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category name (e.g. "Dresses").
    pub category: String,
    /// Current price.
    pub price: Money,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Image URLs, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Available sizes.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Available colors.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Whether the product can be bought right now.
    #[serde(default)]
    pub in_stock: bool,
    /// Whether the product is shown on the home page.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Create a product with no media, sizes or colors.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            description: String::new(),
            images: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            in_stock: true,
            featured: false,
        }
    }

    /// First image, used for thumbnails.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check if the product comes in `size`.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Check if the product comes in `color`.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Case-insensitive substring match on name, description or category.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}
