//! Checkout flow state machine.

use crate::checkout::{PaymentDetails, ShippingAddress};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Shipping address form.
    Shipping,
    /// Card details form.
    Payment,
    /// Order placed.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Complete => 3,
        }
    }
}

/// Checkout progress for one session.
///
/// Forms are validated as they are submitted; an invalid form leaves the
/// flow where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    completed_steps: Vec<CheckoutStep>,
    shipping: Option<ShippingAddress>,
    payment: Option<PaymentDetails>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Start at the shipping step.
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Shipping,
            completed_steps: Vec::new(),
            shipping: None,
            payment: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Steps whose form has been accepted.
    pub fn completed_steps(&self) -> &[CheckoutStep] {
        &self.completed_steps
    }

    pub fn shipping(&self) -> Option<&ShippingAddress> {
        self.shipping.as_ref()
    }

    pub fn payment(&self) -> Option<&PaymentDetails> {
        self.payment.as_ref()
    }

    /// Validate and store the shipping address, then move to payment.
    pub fn submit_shipping(&mut self, address: ShippingAddress) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Shipping, CheckoutStep::Payment)?;
        address.validate()?;

        self.shipping = Some(address);
        self.mark_completed(CheckoutStep::Shipping);
        self.step = CheckoutStep::Payment;
        Ok(self.step)
    }

    /// Validate and store card details. The flow stays on the payment step
    /// until the order is placed.
    pub fn submit_payment(&mut self, payment: PaymentDetails) -> Result<(), CommerceError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Complete)?;
        if self.shipping.is_none() {
            return Err(CommerceError::CheckoutIncomplete("shipping address".to_string()));
        }
        payment.validate()?;

        self.payment = Some(payment);
        self.mark_completed(CheckoutStep::Payment);
        Ok(())
    }

    /// Return from payment to shipping. Entered data is kept.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        match self.step {
            CheckoutStep::Payment => {
                self.step = CheckoutStep::Shipping;
                Ok(self.step)
            }
            other => Err(CommerceError::InvalidCheckoutTransition {
                from: other.as_str().to_string(),
                to: "previous".to_string(),
            }),
        }
    }

    /// Both forms, if the flow is ready to place an order.
    pub fn ready(&self) -> Result<(&ShippingAddress, &PaymentDetails), CommerceError> {
        if self.step == CheckoutStep::Complete {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: "complete".to_string(),
                to: "complete".to_string(),
            });
        }

        let missing = self.missing();
        match (&self.shipping, &self.payment) {
            (Some(shipping), Some(payment)) if missing.is_empty() => Ok((shipping, payment)),
            _ => Err(CommerceError::CheckoutIncomplete(missing.join(", "))),
        }
    }

    /// Mark the order as placed.
    pub fn complete(&mut self) -> Result<(), CommerceError> {
        self.ready()?;
        self.step = CheckoutStep::Complete;
        Ok(())
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        ((self.step.number() as f64 / 3.0) * 100.0) as u8
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.completed_steps.contains(&CheckoutStep::Shipping) {
            missing.push("shipping address");
        }
        if !self.completed_steps.contains(&CheckoutStep::Payment) {
            missing.push("payment details");
        }
        missing
    }

    fn expect_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CommerceError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }

    fn mark_completed(&mut self, step: CheckoutStep) {
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::address::fixtures::address;
    use crate::checkout::payment::fixtures::card;

    #[test]
    fn test_checkout_creation() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert!(flow.completed_steps().is_empty());
        assert_eq!(flow.progress_percent(), 33);
    }

    #[test]
    fn test_happy_path() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.submit_shipping(address()).unwrap(), CheckoutStep::Payment);
        flow.submit_payment(card()).unwrap();

        let (shipping, payment) = flow.ready().unwrap();
        assert_eq!(shipping.first_name, "Ada");
        assert_eq!(payment.cvv, "123");

        flow.complete().unwrap();
        assert!(flow.is_complete());
        assert_eq!(flow.progress_percent(), 100);
    }

    #[test]
    fn test_invalid_shipping_stays_put() {
        let mut flow = CheckoutFlow::new();
        let err = flow.submit_shipping(ShippingAddress::default()).unwrap_err();
        assert!(matches!(err, CommerceError::Validation(_)));
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert!(flow.shipping().is_none());
    }

    #[test]
    fn test_payment_before_shipping_is_rejected() {
        let mut flow = CheckoutFlow::new();
        let err = flow.submit_payment(card()).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidCheckoutTransition { .. }));
    }

    #[test]
    fn test_go_back_keeps_address() {
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(address()).unwrap();
        assert_eq!(flow.go_back().unwrap(), CheckoutStep::Shipping);
        assert!(flow.shipping().is_some());

        assert!(flow.go_back().is_err());
    }

    #[test]
    fn test_not_ready_without_payment() {
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(address()).unwrap();
        match flow.complete() {
            Err(CommerceError::CheckoutIncomplete(missing)) => assert_eq!(missing, "payment details"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_complete_twice_fails() {
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(address()).unwrap();
        flow.submit_payment(card()).unwrap();
        flow.complete().unwrap();
        assert!(flow.complete().is_err());
    }
}
