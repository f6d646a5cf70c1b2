//! Cart line types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Money;

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// One stored cart line.
///
/// A line is identified by product, size and color together; the price is
/// the unit price captured when the line was first added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: String,
    pub color: String,
    /// Unit price at add time.
    pub price: Money,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Create a line stamped with the current time.
    pub fn new(
        product_id: ProductId,
        quantity: u32,
        size: impl Into<String>,
        color: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            product_id,
            quantity,
            size: size.into(),
            color: color.into(),
            price,
            added_at: Utc::now(),
        }
    }

    /// Composite key of this line.
    pub fn key(&self) -> CartLineKey {
        CartLineKey {
            product_id: self.product_id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Check if this line has the given key.
    pub fn matches(&self, key: &CartLineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// Composite key of a cart line: product, size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartLineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl CartLineKey {
    pub fn new(product_id: impl Into<ProductId>, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// Partial update for a cart line.
///
/// Unset fields are left alone. A quantity below 1 removes the line; one
/// above [`MAX_LINE_QUANTITY`] is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartPatch {
    pub quantity: Option<i64>,
    pub price: Option<Money>,
}

impl CartPatch {
    /// Patch that only sets the quantity.
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            price: None,
        }
    }

    /// Patch that only sets the unit price.
    pub fn price(price: Money) -> Self {
        Self {
            quantity: None,
            price: Some(price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_serializes_storage_shape() {
        let line = CartLine::new(ProductId::new(7), 2, "M", "Black", Money::from_cents(4999));
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["productId"], 7);
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["size"], "M");
        assert_eq!(value["color"], "Black");
        assert_eq!(value["price"], 49.99);
        assert!(value["addedAt"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_key_matching() {
        let line = CartLine::new(ProductId::new(7), 1, "M", "Black", Money::from_cents(4999));
        assert!(line.matches(&CartLineKey::new(7, "M", "Black")));
        assert!(!line.matches(&CartLineKey::new(7, "L", "Black")));
        assert!(!line.matches(&CartLineKey::new(7, "M", "Brown")));
        assert_eq!(line.key(), CartLineKey::new(7, "M", "Black"));
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new(ProductId::new(1), 3, "S", "Red", Money::from_cents(1050));
        assert_eq!(line.line_total(), Money::from_cents(3150));
    }
}
