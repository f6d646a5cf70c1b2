//! Checkout command.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use vault_commerce::checkout::{CheckoutFlow, PaymentDetails, ShippingAddress};
use vault_commerce::{CommerceError, FieldErrors};

use super::CheckoutArgs;
use crate::commands::orders::print_order;
use crate::context::Context;
use crate::output::price;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    let view = shop.cart_view().await;
    if view.is_empty() {
        bail!("Your cart is empty. Please add items before checkout.");
    }

    let (shipping, payment, yes) = split_args(args);
    let mut flow = CheckoutFlow::new();

    // Step 1: Shipping
    ctx.output.header("Shipping");
    if let Err(e) = flow.submit_shipping(shipping) {
        return Err(report(e, ctx));
    }
    if let Some(address) = flow.shipping() {
        ctx.output.kv("Ship to", &address.full_name());
        ctx.output.kv("Address", &address.one_line());
    }

    // Step 2: Payment
    ctx.output.header("Payment");
    if let Err(e) = flow.submit_payment(payment) {
        return Err(report(e, ctx));
    }
    if let Some(card) = flow.payment() {
        ctx.output.kv("Card", &card.mask().card_number);
    }

    // Step 3: Review
    let totals = shop.pricing().totals(view.total());
    ctx.output.header("Order Summary");
    ctx.output.kv("Items", &view.item_count().to_string());
    ctx.output.kv("Subtotal", &price(totals.subtotal));
    if totals.shipping.is_zero() {
        ctx.output.kv("Shipping", "Free");
    } else {
        ctx.output.kv("Shipping", &price(totals.shipping));
    }
    ctx.output.kv("Tax", &price(totals.tax));
    ctx.output.kv("Total", &price(totals.total));

    if !yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", price(totals.total)))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = shop.checkout(&mut flow).await;
    spinner.finish_and_clear();

    let order = match result {
        Ok(order) => order,
        Err(e) => return Err(report(e, ctx)),
    };

    ctx.output.success(&format!("Order {} placed successfully!", order.id));
    print_order(&order, ctx);
    Ok(())
}

fn split_args(args: CheckoutArgs) -> (ShippingAddress, PaymentDetails, bool) {
    let shipping = ShippingAddress {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        city: args.city,
        state: args.state,
        zip_code: args.zip_code,
        country: args.country,
    };
    let payment = PaymentDetails {
        card_number: args.card_number,
        expiry_date: args.expiry_date,
        cvv: args.cvv,
        cardholder_name: args.cardholder_name,
    };
    (shipping, payment, args.yes)
}

/// List field errors one per line before failing.
fn report(e: CommerceError, ctx: &Context) -> anyhow::Error {
    if let CommerceError::Validation(ref errors) = e {
        print_field_errors(errors, ctx);
    }
    e.into()
}

fn print_field_errors(errors: &FieldErrors, ctx: &Context) {
    for (field, message) in errors.iter() {
        ctx.output.list_item(&format!("--{}: {}", flag_name(field), message));
    }
}

/// `zipCode` -> `zip-code`
fn flag_name(field: &str) -> String {
    let mut flag = String::with_capacity(field.len() + 2);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            flag.push('-');
            flag.push(c.to_ascii_lowercase());
        } else {
            flag.push(c);
        }
    }
    flag
}
