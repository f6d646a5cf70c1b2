//! Product search command.

use anyhow::{bail, Result};
use vault_commerce::search::{SearchFilters, SortOption};
use vault_commerce::Money;

use super::SearchArgs;
use crate::commands::products::print_products;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let filters = build_filters(&args, ctx)?;
    let catalog = ctx.catalog()?;
    let results = catalog.search(&args.query, &filters);

    if args.query.is_empty() {
        ctx.output.header(&format!("{} products", results.len()));
    } else {
        ctx.output
            .header(&format!("{} results for \"{}\"", results.len(), args.query));
    }
    if let Some(sort) = filters.sort_by {
        ctx.output.debug(&format!("Sorted by {}", sort.display_name()));
    }

    print_products(&results, ctx);
    Ok(())
}

fn build_filters(args: &SearchArgs, ctx: &Context) -> Result<SearchFilters> {
    let min_price = args.min_price.map(Money::from_decimal);
    let max_price = args.max_price.map(Money::from_decimal);
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if min > max {
            bail!("--min-price {} is above --max-price {}", min, max);
        }
    }

    let mut filters = SearchFilters::new().with_price_range(min_price, max_price);
    filters.category = args.category.clone();
    filters.colors = args.colors.clone();
    filters.sizes = args.sizes.clone();
    filters.in_stock = args.in_stock;

    if let Some(ref sort) = args.sort {
        match SortOption::parse(sort) {
            Some(option) => filters.sort_by = Some(option),
            None => ctx
                .output
                .warn(&format!("Unknown sort '{}', keeping catalog order", sort)),
        }
    }

    Ok(filters)
}
