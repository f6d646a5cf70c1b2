//! Checkout module.
//!
//! Contains the checkout flow, form types, orders and the order store.

mod address;
mod flow;
mod order;
mod payment;
mod store;

pub use address::{ShippingAddress, DEFAULT_COUNTRY};
pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::{NewOrder, Order, OrderItem, OrderStatus};
pub use payment::{PaymentDetails, PaymentReference};
pub use store::OrderStore;
