//! Commerce error types.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
///
/// Storage failures never appear here: slots degrade to empty lists and log
/// instead of failing the caller.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    /// Order not found.
    #[error("Order with id {0} not found")]
    OrderNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Form validation failed.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Catalog(e.to_string())
    }
}

/// Field-level validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    /// Message for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Merge another set into this one.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.add(field, message);
        }
    }

    /// `Ok(())` when empty, otherwise a [`CommerceError::Validation`].
    pub fn into_result(self) -> Result<(), CommerceError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        let e = CommerceError::ProductNotFound(ProductId::new(99));
        assert_eq!(e.to_string(), "Product with id 99 not found");

        let e = CommerceError::OrderNotFound("VVXYZ".to_string());
        assert_eq!(e.to_string(), "Order with id VVXYZ not found");
    }

    #[test]
    fn test_field_errors() {
        let mut errors = FieldErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add("email", "This field is required");
        errors.add("email", "Please enter a valid email address");
        errors.add("city", "This field is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("This field is required"));
        assert_eq!(
            errors.to_string(),
            "city: This field is required; email: This field is required"
        );
        assert!(matches!(
            errors.into_result(),
            Err(CommerceError::Validation(_))
        ));
    }
}
