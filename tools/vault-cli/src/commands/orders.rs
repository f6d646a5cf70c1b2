//! Order history commands.

use anyhow::Result;
use vault_commerce::checkout::Order;

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{price, status_badge, truncate};

const WIDTHS: [usize; 4] = [20, 20, 6, 10];
const ITEM_WIDTHS: [usize; 5] = [28, 8, 8, 4, 10];

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    match args.command {
        OrdersCommand::List => {
            let orders = shop.orders().get_all_orders();
            if ctx.output.is_json() {
                ctx.output.json(&orders);
                return Ok(());
            }

            ctx.output.header(&format!("Orders ({})", orders.len()));
            if orders.is_empty() {
                ctx.output.info("No orders placed yet");
                return Ok(());
            }

            ctx.output.table_row(&["ID", "PLACED", "ITEMS", "TOTAL"], &WIDTHS);
            for order in orders.iter().rev() {
                let placed = order.created_at.format("%Y-%m-%d %H:%M").to_string();
                let items = order.item_count().to_string();
                let total = price(order.total);
                ctx.output.table_row(
                    &[order.id.as_str(), placed.as_str(), items.as_str(), total.as_str()],
                    &WIDTHS,
                );
            }
            Ok(())
        }
        OrdersCommand::Show { id } => {
            let order = shop.orders().get_order_by_id(&id)?;
            print_order(&order, ctx);
            Ok(())
        }
    }
}

/// Print one order in full, or as JSON.
pub(crate) fn print_order(order: &Order, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header(&format!("Order {}", order.id));
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv(
        "Placed",
        &order.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    ctx.output.kv("Ship to", &order.shipping.full_name());
    ctx.output.kv("Address", &order.shipping.one_line());
    ctx.output.kv("Email", &order.shipping.email);
    ctx.output.kv("Card", &order.payment.card_number);

    ctx.output.info("");
    ctx.output
        .table_row(&["NAME", "SIZE", "COLOR", "QTY", "TOTAL"], &ITEM_WIDTHS);
    for item in &order.items {
        let name = truncate(&item.product_name, ITEM_WIDTHS[0]);
        let qty = item.quantity.to_string();
        let total = price(item.line_total());
        ctx.output.table_row(
            &[
                name.as_str(),
                item.size.as_str(),
                item.color.as_str(),
                qty.as_str(),
                total.as_str(),
            ],
            &ITEM_WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Subtotal", &price(order.subtotal));
    ctx.output.kv("Shipping", &price(order.shipping_cost));
    ctx.output.kv("Tax", &price(order.tax));
    ctx.output.kv("Total", &price(order.total));
}
