//! Shopping cart module.
//!
//! Contains stored cart lines, the cart store, and pricing.

mod line;
mod pricing;
mod store;

pub use line::{CartLine, CartLineKey, CartPatch, MAX_LINE_QUANTITY};
pub use pricing::{CartView, CheckoutTotals, PricingPolicy};
pub use store::CartStore;
