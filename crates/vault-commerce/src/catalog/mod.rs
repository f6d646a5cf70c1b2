//! Product catalog module.
//!
//! The catalog is a fixed, read-only product list injected at startup. It
//! answers id lookups, category/featured listings and faceted searches.

mod product;

pub use product::Product;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::search::{self, SearchFilters};

/// Anything that can resolve a product by id.
///
/// Enrichment is written against this trait so the lookup can be backed by
/// something slower than an in-memory list.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one product, failing with `ProductNotFound` if it is unknown.
    async fn product(&self, id: ProductId) -> Result<Product, CommerceError>;
}

/// Read-only in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog from a product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Load a JSON product file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CommerceError::Catalog(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Borrow every product in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Copy of every product.
    pub fn all(&self) -> Vec<Product> {
        self.products.to_vec()
    }

    /// Look a product up by id.
    pub fn get(&self, id: ProductId) -> Result<Product, CommerceError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CommerceError::ProductNotFound(id))
    }

    /// Products in an exact category.
    pub fn by_category(&self, category: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Featured products.
    pub fn featured(&self) -> Vec<Product> {
        self.products.iter().filter(|p| p.featured).cloned().collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Facet values available for filtering.
    pub fn filter_options(&self) -> FilterOptions {
        let colors = distinct(self.products.iter().flat_map(|p| p.colors.iter().map(String::as_str)));
        let sizes = distinct(self.products.iter().flat_map(|p| p.sizes.iter().map(String::as_str)));
        let price_range = self
            .products
            .iter()
            .map(|p| p.price)
            .min()
            .zip(self.products.iter().map(|p| p.price).max())
            .map(|(min, max)| PriceRange { min, max });

        FilterOptions {
            colors,
            sizes,
            price_range,
        }
    }

    /// Text search plus facet filters. See [`search::search`].
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<Product> {
        search::search(&self.products, query, filters)
    }
}

#[async_trait]
impl ProductSource for Catalog {
    async fn product(&self, id: ProductId) -> Result<Product, CommerceError> {
        self.get(id)
    }
}

/// Distinct facet values offered by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    /// `None` for an empty catalog.
    pub price_range: Option<PriceRange>,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_id() {
        let catalog = fixtures::catalog();
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().name, "Linen Shirt");
        assert!(matches!(
            catalog.get(ProductId::new(99)),
            Err(CommerceError::ProductNotFound(id)) if id == ProductId::new(99)
        ));
    }

    #[test]
    fn test_by_category_and_featured() {
        let catalog = fixtures::catalog();
        let outerwear: Vec<u32> = catalog.by_category("Outerwear").iter().map(|p| p.id.get()).collect();
        assert_eq!(outerwear, vec![3, 4]);

        let featured: Vec<u32> = catalog.featured().iter().map(|p| p.id.get()).collect();
        assert_eq!(featured, vec![1, 3, 7]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = fixtures::catalog();
        assert_eq!(
            catalog.categories(),
            vec!["Dresses", "Tops", "Outerwear", "Accessories", "Shoes"]
        );
    }

    #[test]
    fn test_filter_options() {
        let options = fixtures::catalog().filter_options();
        assert_eq!(options.colors, vec!["Red", "Blue", "White", "Camel", "Black", "Green", "Brown"]);
        assert_eq!(options.sizes, vec!["S", "M", "L", "XL", "One Size"]);
        let range = options.price_range.unwrap();
        assert_eq!(range.min, Money::from_cents(2500));
        assert_eq!(range.max, Money::from_cents(24999));
    }

    #[test]
    fn test_filter_options_empty_catalog() {
        let options = Catalog::default().filter_options();
        assert!(options.colors.is_empty());
        assert_eq!(options.price_range, None);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("{oops"),
            Err(CommerceError::Catalog(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("not/here.json"));
    }

    #[tokio::test]
    async fn test_catalog_is_a_product_source() {
        let catalog = fixtures::catalog();
        let source: &dyn ProductSource = &catalog;
        assert_eq!(source.product(ProductId::new(7)).await.unwrap().name, "Leather Boots");
        assert!(source.product(ProductId::new(8)).await.is_err());
    }
}
