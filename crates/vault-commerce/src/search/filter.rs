//! Search filter types.

use crate::catalog::Product;
use crate::money::Money;
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Facet filters for a catalog search.
///
/// Every set field narrows the result (AND); within `colors` and `sizes` a
/// product only needs one matching value (OR).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Exact category, or `"all"`/`None` for every category.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    /// Accepted colors.
    pub colors: Vec<String>,
    /// Accepted sizes.
    pub sizes: Vec<String>,
    /// Only keep in-stock products.
    pub in_stock: bool,
    /// Result ordering; `None` keeps catalog order.
    pub sort_by: Option<SortOption>,
}

impl SearchFilters {
    /// No filtering, catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set inclusive price bounds.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Accept an additional color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.push(color.into());
        self
    }

    /// Accept an additional size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.push(size.into());
        self
    }

    /// Only keep in-stock products.
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock = true;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort_by = Some(sort);
        self
    }

    /// Check a product against every facet.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref() {
            if category != ALL_CATEGORIES && product.category != category {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }

        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }

        if !self.colors.is_empty() && !self.colors.iter().any(|c| product.has_color(c)) {
            return false;
        }

        if !self.sizes.is_empty() && !self.sizes.iter().any(|s| product.has_size(s)) {
            return false;
        }

        !self.in_stock || product.in_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jacket() -> Product {
        let mut p = Product::new(4, "Denim Jacket", "Outerwear", Money::from_cents(7999));
        p.sizes = vec!["S".to_string(), "M".to_string()];
        p.colors = vec!["Blue".to_string()];
        p
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(SearchFilters::new().matches(&jacket()));
    }

    #[test]
    fn test_all_category_is_ignored() {
        assert!(SearchFilters::new().with_category("all").matches(&jacket()));
        assert!(SearchFilters::new().with_category("Outerwear").matches(&jacket()));
        assert!(!SearchFilters::new().with_category("Dresses").matches(&jacket()));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let exact = Some(Money::from_cents(7999));
        assert!(SearchFilters::new().with_price_range(exact, exact).matches(&jacket()));
        assert!(!SearchFilters::new()
            .with_price_range(Some(Money::from_cents(8000)), None)
            .matches(&jacket()));
        assert!(!SearchFilters::new()
            .with_price_range(None, Some(Money::from_cents(7998)))
            .matches(&jacket()));
    }

    #[test]
    fn test_facets_are_or_within_and_across() {
        let f = SearchFilters::new().with_color("Red").with_color("Blue");
        assert!(f.matches(&jacket()));

        let f = f.with_size("XL");
        assert!(!f.matches(&jacket()));

        let f = f.with_size("M");
        assert!(f.matches(&jacket()));
    }

    #[test]
    fn test_in_stock() {
        let mut p = jacket();
        p.in_stock = false;
        assert!(SearchFilters::new().matches(&p));
        assert!(!SearchFilters::new().in_stock_only().matches(&p));
    }

    #[test]
    fn test_filters_deserialize_from_camel_case() {
        let f: SearchFilters =
            serde_json::from_str(r#"{"category":"all","sortBy":"price-low","minPrice":10}"#).unwrap();
        assert_eq!(f.category.as_deref(), Some("all"));
        assert_eq!(f.sort_by, Some(SortOption::PriceLow));
        assert_eq!(f.min_price, Some(Money::from_cents(1000)));
        assert!(f.colors.is_empty());
    }
}
