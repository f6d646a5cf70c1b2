//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use vault_commerce::cart::{CartLineKey, CartPatch, CartView};
use vault_commerce::catalog::Product;
use vault_commerce::{ProductId, Storefront};

use super::{CartArgs, CartCommand, LineArgs};
use crate::context::Context;
use crate::output::{price, truncate};

const WIDTHS: [usize; 6] = [4, 28, 8, 8, 4, 10];

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    match args.command {
        CartCommand::Show => show_cart(&shop, ctx).await,
        CartCommand::Add {
            id,
            quantity,
            size,
            color,
        } => add(&shop, ProductId::new(id), quantity, size, color, ctx).await,
        CartCommand::Update { line, quantity } => update(&shop, line, quantity, ctx).await,
        CartCommand::Remove { line } => remove(&shop, line, ctx).await,
        CartCommand::Clear { yes } => clear(&shop, yes, ctx).await,
    }
}

async fn show_cart(shop: &Storefront, ctx: &Context) -> Result<()> {
    let view = shop.cart_view().await;
    print_cart(shop, &view, ctx);
    Ok(())
}

async fn add(
    shop: &Storefront,
    id: ProductId,
    quantity: u32,
    size: Option<String>,
    color: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let product = shop.catalog().get(id)?;
    let size = pick_option("size", size, &product.sizes, &product)?;
    let color = pick_option("color", color, &product.colors, &product)?;

    if !product.in_stock {
        ctx.output.warn(&format!("{} is currently out of stock", product.name));
    }

    let view = shop.add_product_to_cart(id, quantity, &size, &color).await?;
    ctx.output.success(&format!(
        "Added {} x {} ({}, {}) to cart",
        quantity, product.name, size, color
    ));
    print_cart(shop, &view, ctx);
    Ok(())
}

async fn update(shop: &Storefront, line: LineArgs, quantity: i64, ctx: &Context) -> Result<()> {
    let key = line_key(&line);
    let exists = shop.cart().get_cart().iter().any(|l| l.matches(&key));
    if !exists {
        bail!("No cart line for product {} ({}, {})", line.id, line.size, line.color);
    }

    shop.cart()
        .update_cart_item(&key, CartPatch::quantity(quantity))
        .await?;
    if quantity < 1 {
        ctx.output.success("Removed line from cart");
    } else {
        ctx.output.success(&format!("Quantity set to {}", quantity));
    }
    show_cart(shop, ctx).await
}

async fn remove(shop: &Storefront, line: LineArgs, ctx: &Context) -> Result<()> {
    shop.cart().remove_from_cart(&line_key(&line)).await;
    ctx.output.success("Removed line from cart");
    show_cart(shop, ctx).await
}

async fn clear(shop: &Storefront, yes: bool, ctx: &Context) -> Result<()> {
    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Remove everything from the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    shop.cart().clear_cart().await;
    ctx.output.success("Cart cleared");
    Ok(())
}

fn line_key(line: &LineArgs) -> CartLineKey {
    CartLineKey::new(line.id, line.size.as_str(), line.color.as_str())
}

/// Use the requested value, or the product's first option when none was
/// given. Products without options take an empty value.
fn pick_option(what: &str, requested: Option<String>, offered: &[String], product: &Product) -> Result<String> {
    match requested {
        Some(value) => {
            if !offered.is_empty() && !offered.contains(&value) {
                bail!(
                    "{} is not available in {} '{}' (choose from: {})",
                    product.name,
                    what,
                    value,
                    offered.join(", ")
                );
            }
            Ok(value)
        }
        None => Ok(offered.first().cloned().unwrap_or_default()),
    }
}

fn print_cart(shop: &Storefront, view: &CartView, ctx: &Context) {
    let totals = shop.pricing().totals(view.total());

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": view.items,
            "itemCount": view.item_count(),
            "totals": totals,
        }));
        return;
    }

    ctx.output.header("Cart");
    if view.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    ctx.output
        .table_row(&["ID", "NAME", "SIZE", "COLOR", "QTY", "TOTAL"], &WIDTHS);
    for item in &view.items {
        let id = item.entry.product_id.to_string();
        let name = truncate(&item.product.name, WIDTHS[1]);
        let qty = item.entry.quantity.to_string();
        let total = price(item.entry.line_total());
        ctx.output.table_row(
            &[
                id.as_str(),
                name.as_str(),
                item.entry.size.as_str(),
                item.entry.color.as_str(),
                qty.as_str(),
                total.as_str(),
            ],
            &WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Items", &view.item_count().to_string());
    ctx.output.kv("Subtotal", &price(totals.subtotal));
    ctx.output.kv("Shipping", &price(totals.shipping));
    ctx.output.kv("Tax", &price(totals.tax));
    ctx.output.kv("Total", &price(totals.total));

    let remaining = shop.pricing().amount_until_free_shipping(totals.subtotal);
    if !remaining.is_zero() {
        ctx.output
            .info(&format!("Add {} more for free shipping", price(remaining)));
    }
}
