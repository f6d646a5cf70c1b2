//! Catalog browsing commands.

use anyhow::Result;
use vault_commerce::catalog::Product;
use vault_commerce::ProductId;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{price, stock_badge, truncate};

const WIDTHS: [usize; 5] = [4, 32, 14, 10, 8];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List { category } => list_products(category.as_deref(), ctx),
        ProductsCommand::Show { id } => show_product(ProductId::new(id), ctx),
        ProductsCommand::Featured => featured(ctx),
        ProductsCommand::Categories => categories(ctx),
        ProductsCommand::Filters => filters(ctx),
    }
}

fn list_products(category: Option<&str>, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let products = match category {
        Some(category) => catalog.by_category(category),
        None => catalog.all(),
    };

    match category {
        Some(category) => ctx.output.header(&format!("Products in {}", category)),
        None => ctx.output.header("Products"),
    }
    print_products(&products, ctx);
    Ok(())
}

fn show_product(id: ProductId, ctx: &Context) -> Result<()> {
    let product = ctx.catalog()?.get(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &price(product.price));
    ctx.output.kv("Stock", &stock_badge(product.in_stock));
    if !product.sizes.is_empty() {
        ctx.output.kv("Sizes", &product.sizes.join(", "));
    }
    if !product.colors.is_empty() {
        ctx.output.kv("Colors", &product.colors.join(", "));
    }
    if let Some(image) = product.primary_image() {
        ctx.output.kv("Image", image);
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    Ok(())
}

fn featured(ctx: &Context) -> Result<()> {
    let products = ctx.catalog()?.featured();
    ctx.output.header("Featured");
    print_products(&products, ctx);
    Ok(())
}

fn categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let categories = catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        let count = catalog.by_category(category).len();
        ctx.output.list_item(&format!("{} ({})", category, count));
    }
    Ok(())
}

fn filters(ctx: &Context) -> Result<()> {
    let options = ctx.catalog()?.filter_options();

    if ctx.output.is_json() {
        ctx.output.json(&options);
        return Ok(());
    }

    ctx.output.header("Filters");
    ctx.output.kv("Colors", &options.colors.join(", "));
    ctx.output.kv("Sizes", &options.sizes.join(", "));
    if let Some(range) = options.price_range {
        ctx.output.kv("Price", &format!("{} - {}", price(range.min), price(range.max)));
    }
    Ok(())
}

/// Print products as a table, or as JSON.
pub(crate) fn print_products(products: &[Product], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }

    if products.is_empty() {
        ctx.output.info("No products found");
        return;
    }

    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &WIDTHS);
    for product in products {
        let id = product.id.to_string();
        let name = truncate(&product.name, WIDTHS[1]);
        let amount = price(product.price);
        let stock = stock_badge(product.in_stock);
        ctx.output.table_row(
            &[id.as_str(), name.as_str(), product.category.as_str(), amount.as_str(), stock.as_str()],
            &WIDTHS,
        );
    }
}
