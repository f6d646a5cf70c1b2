//! Search module.
//!
//! Text search and facet filtering over the in-memory catalog.

mod filter;
mod query;

pub use filter::{SearchFilters, ALL_CATEGORIES};
pub use query::{search, SortOption};
