//! Order types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CheckoutTotals};
use crate::checkout::{PaymentReference, ShippingAddress};
use crate::enrich::Enriched;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed and accepted.
    #[default]
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed order. Never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "Id")]
    pub id: OrderId,
    /// Cart snapshot at order time.
    pub items: Vec<OrderItem>,
    pub shipping: ShippingAddress,
    pub payment: PaymentReference,
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub tax: Money,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Stamp new order data with an id, creation time and confirmed status.
    pub fn from_new(id: OrderId, new: NewOrder) -> Self {
        Self {
            id,
            items: new.items,
            shipping: new.shipping,
            payment: new.payment,
            subtotal: new.subtotal,
            shipping_cost: new.shipping_cost,
            tax: new.tax,
            total: new.total,
            created_at: Utc::now(),
            status: OrderStatus::Confirmed,
        }
    }

    /// Total number of units.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// One line of an order snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: String,
    pub color: String,
    /// Unit price captured in the cart.
    pub price: Money,
    pub product_name: String,
}

impl OrderItem {
    /// Snapshot an enriched cart line.
    pub fn from_cart(item: &Enriched<CartLine>) -> Self {
        Self {
            product_id: item.entry.product_id,
            quantity: item.entry.quantity,
            size: item.entry.size.clone(),
            color: item.entry.color.clone(),
            price: item.entry.price,
            product_name: item.product.name.clone(),
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// Order data before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub shipping: ShippingAddress,
    pub payment: PaymentReference,
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub tax: Money,
    pub total: Money,
}

impl NewOrder {
    pub fn new(
        items: Vec<OrderItem>,
        shipping: ShippingAddress,
        payment: PaymentReference,
        totals: CheckoutTotals,
    ) -> Self {
        Self {
            items,
            shipping,
            payment,
            subtotal: totals.subtotal,
            shipping_cost: totals.shipping,
            tax: totals.tax,
            total: totals.total,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serializes_storage_shape() {
        let order = Order::from_new(OrderId::new("VVTEST"), fixtures::new_order());
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["Id"], "VVTEST");
        assert_eq!(value["status"], "confirmed");
        assert_eq!(value["subtotal"], 99.98);
        assert_eq!(value["shippingCost"], 15.0);
        assert_eq!(value["tax"], 8.0);
        assert_eq!(value["total"], 122.98);
        assert_eq!(value["items"][0]["productName"], "Leather Boots");
        assert_eq!(value["payment"]["cardNumber"], "**** **** **** 1234");
        assert_eq!(value["shipping"]["zipCode"], "10001");
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_order_item_count() {
        let order = Order::from_new(OrderId::new("VVTEST"), fixtures::new_order());
        assert_eq!(order.item_count(), 2);
    }
}
