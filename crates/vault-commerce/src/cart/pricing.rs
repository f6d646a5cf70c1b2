//! Cart totals and checkout pricing.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::enrich::Enriched;
use crate::money::Money;

/// Cart lines joined with their catalog products.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<Enriched<CartLine>>,
}

impl CartView {
    pub fn new(items: Vec<Enriched<CartLine>>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of captured unit price times quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.entry.line_total()).sum()
    }

    /// Total number of units.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.entry.quantity)).sum()
    }
}

/// Shipping and tax rules applied at checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingPolicy {
    /// Orders strictly above this subtotal ship free.
    pub free_shipping_threshold: Money,
    /// Shipping charged otherwise.
    pub flat_shipping: Money,
    /// Tax rate applied to the subtotal.
    pub tax_rate: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::from_cents(200_00),
            flat_shipping: Money::from_cents(15_00),
            tax_rate: 0.08,
        }
    }
}

impl PricingPolicy {
    /// Shipping cost for a subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping
        }
    }

    /// Tax for a subtotal, rounded to the cent.
    pub fn tax_for(&self, subtotal: Money) -> Money {
        subtotal.apply_rate(self.tax_rate)
    }

    /// Full breakdown for a subtotal.
    pub fn totals(&self, subtotal: Money) -> CheckoutTotals {
        let shipping = self.shipping_for(subtotal);
        let tax = self.tax_for(subtotal);
        CheckoutTotals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// How much more must be spent before shipping is free.
    ///
    /// Zero once the subtotal already qualifies.
    pub fn amount_until_free_shipping(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.free_shipping_threshold.saturating_sub(subtotal)
        }
    }
}

/// Pricing breakdown shown at checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    /// subtotal + shipping + tax
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::ids::ProductId;

    #[test]
    fn test_item_count_does_not_overflow() {
        // Stored data may predate the per-line cap.
        let product = Product::new(7, "Leather Boots", "Shoes", Money::from_cents(4999));
        let view = CartView::new(vec![
            Enriched {
                entry: CartLine::new(ProductId::new(7), u32::MAX, "M", "Black", product.price),
                product: product.clone(),
            },
            Enriched {
                entry: CartLine::new(ProductId::new(7), 1, "L", "Black", product.price),
                product,
            },
        ]);

        assert_eq!(view.item_count(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_flat_shipping_at_threshold() {
        let policy = PricingPolicy::default();
        let totals = policy.totals(Money::from_cents(200_00));
        assert_eq!(totals.shipping, Money::from_cents(15_00));
        assert_eq!(totals.tax, Money::from_cents(16_00));
        assert_eq!(totals.total, Money::from_cents(231_00));
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let policy = PricingPolicy::default();
        let totals = policy.totals(Money::from_cents(249_95));
        assert_eq!(totals.shipping, Money::zero());
        // 19.996 rounds up
        assert_eq!(totals.tax, Money::from_cents(20_00));
        assert_eq!(totals.total, Money::from_cents(269_95));
    }

    #[test]
    fn test_amount_until_free_shipping() {
        let policy = PricingPolicy::default();
        assert_eq!(
            policy.amount_until_free_shipping(Money::from_cents(150_00)),
            Money::from_cents(50_00)
        );
        assert_eq!(policy.amount_until_free_shipping(Money::from_cents(200_00)), Money::zero());
        assert_eq!(policy.amount_until_free_shipping(Money::from_cents(300_00)), Money::zero());
    }

    #[test]
    fn test_policy_deserializes_partial_config() {
        let policy: PricingPolicy = serde_json::from_str(r#"{"tax_rate":0.1}"#).unwrap();
        assert_eq!(policy.tax_rate, 0.1);
        assert_eq!(policy.flat_shipping, Money::from_cents(15_00));
    }
}
