//! Card details entered at checkout.

use serde::{Deserialize, Serialize};

use crate::error::{CommerceError, FieldErrors};

const MASK_PREFIX: &str = "**** **** **** ";

/// Raw card details. Never persisted; see [`PaymentDetails::mask`].
#[derive(Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_number", &self.masked_number())
            .field("expiry_date", &self.expiry_date)
            .field("cardholder_name", &self.cardholder_name)
            .finish_non_exhaustive()
    }
}

impl PaymentDetails {
    fn digits(&self) -> String {
        self.card_number.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn masked_number(&self) -> String {
        let digits = self.digits();
        let last4: String = digits.chars().skip(digits.chars().count().saturating_sub(4)).collect();
        format!("{}{}", MASK_PREFIX, last4)
    }

    /// Collect field errors without failing.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let digits = self.digits();
        if digits.is_empty() {
            errors.add("cardNumber", "Card number is required");
        } else if digits.chars().count() < 16 {
            errors.add("cardNumber", "Please enter a valid card number");
        }

        if self.expiry_date.is_empty() {
            errors.add("expiryDate", "Expiry date is required");
        }

        if self.cvv.is_empty() {
            errors.add("cvv", "CVV is required");
        } else if self.cvv.chars().count() < 3 {
            errors.add("cvv", "CVV must be at least 3 digits");
        }

        if self.cardholder_name.trim().is_empty() {
            errors.add("cardholderName", "Cardholder name is required");
        }

        errors
    }

    /// Validate the card details, failing with every field error.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.field_errors().into_result()
    }

    /// Reduce to what may be stored with an order.
    pub fn mask(&self) -> PaymentReference {
        PaymentReference {
            card_number: self.masked_number(),
            expiry_date: self.expiry_date.clone(),
            cardholder_name: self.cardholder_name.clone(),
        }
    }
}

/// Payment as recorded on an order: only the last four card digits survive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReference {
    pub card_number: String,
    pub expiry_date: String,
    pub cardholder_name: String,
}

impl PaymentReference {
    /// Last four digits of the card.
    pub fn last4(&self) -> &str {
        self.card_number.strip_prefix(MASK_PREFIX).unwrap_or(&self.card_number)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn card() -> PaymentDetails {
        PaymentDetails {
            card_number: "4242 4242 4242 1234".to_string(),
            expiry_date: "12/29".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Ada Lovelace".to_string(),
        }
    }
}
