//! Wishlist commands.

use anyhow::Result;
use dialoguer::Confirm;
use vault_commerce::{ProductId, Storefront};

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;
use crate::output::{price, stock_badge, truncate};

const WIDTHS: [usize; 4] = [4, 32, 10, 8];

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    match args.command {
        WishlistCommand::Show => show(&shop, ctx).await,
        WishlistCommand::Add { id } => {
            let product = shop.catalog().get(ProductId::new(id))?;
            shop.wishlist().add(product.id).await;
            ctx.output.success(&format!("Saved {}", product.name));
            show(&shop, ctx).await
        }
        WishlistCommand::Remove { id } => {
            shop.wishlist().remove(ProductId::new(id)).await;
            ctx.output.success(&format!("Removed product {} from wishlist", id));
            show(&shop, ctx).await
        }
        WishlistCommand::Toggle { id } => {
            if shop.toggle_wishlist(ProductId::new(id)).await? {
                ctx.output.success(&format!("Saved product {}", id));
            } else {
                ctx.output.success(&format!("Removed product {} from wishlist", id));
            }
            show(&shop, ctx).await
        }
        WishlistCommand::Clear { yes } => clear(&shop, yes, ctx).await,
    }
}

async fn show(shop: &Storefront, ctx: &Context) -> Result<()> {
    let view = shop.wishlist_view().await;

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", view.len()));
    if view.is_empty() {
        ctx.output.info("Nothing saved yet");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "STOCK"], &WIDTHS);
    for item in &view {
        let id = item.product.id.to_string();
        let name = truncate(&item.product.name, WIDTHS[1]);
        let amount = price(item.product.price);
        let stock = stock_badge(item.product.in_stock);
        ctx.output.table_row(
            &[id.as_str(), name.as_str(), amount.as_str(), stock.as_str()],
            &WIDTHS,
        );
    }
    Ok(())
}

async fn clear(shop: &Storefront, yes: bool, ctx: &Context) -> Result<()> {
    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Forget every saved product?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Wishlist left unchanged");
            return Ok(());
        }
    }

    shop.wishlist().clear().await;
    ctx.output.success("Wishlist cleared");
    Ok(())
}
