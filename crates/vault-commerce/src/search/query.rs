//! Catalog search.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::search::SearchFilters;
use serde::{Deserialize, Serialize};

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    /// Sort by name A-Z.
    #[serde(rename = "name")]
    Name,
    /// Sort by price, low to high.
    #[serde(rename = "price-low")]
    PriceLow,
    /// Sort by price, high to low.
    #[serde(rename = "price-high")]
    PriceHigh,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Name => "name",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Name => "Name: A-Z",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
        }
    }

    /// Parse a sort key; unknown keys yield `None` (keep catalog order).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortOption::Name),
            "price-low" => Some(SortOption::PriceLow),
            "price-high" => Some(SortOption::PriceHigh),
            _ => None,
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortOption::PriceLow => a.price.cmp(&b.price),
            SortOption::PriceHigh => b.price.cmp(&a.price),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown sort option: {}", s))
    }
}

/// Search `products` by text and facets.
///
/// A non-empty `query` keeps products whose name, description or category
/// contains it, ignoring case. The query is matched as given, surrounding
/// whitespace included. Filters then narrow the list and the sort, if
/// any, is stable.
pub fn search(products: &[Product], query: &str, filters: &SearchFilters) -> Vec<Product> {
    let needle = query.to_lowercase();

    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.matches_text(&needle))
        .filter(|p| filters.matches(p))
        .cloned()
        .collect();

    if let Some(sort) = filters.sort_by {
        results.sort_by(|a, b| sort.compare(a, b));
    }

    tracing::debug!(query = %query, results = results.len(), "Catalog search");
    results
}
