//! Checkout step machine.
//!
//! The flow is strictly linear: `Cart -> AddressPayment -> Contact ->
//! Confirmation`. There is no going back; abandoning at any point discards
//! the draft and restarts from `Cart`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cart::Cart;
use crate::checkout::{Order, OrderDraft, PaymentMethod};
use crate::error::CommerceError;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Cart review; checkout has not started.
    Cart,
    /// Delivery address and payment method.
    AddressPayment,
    /// Email and phone.
    Contact,
    /// Order accepted; showing the amount charged.
    Confirmation,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "cart",
            CheckoutStep::AddressPayment => "address_payment",
            CheckoutStep::Contact => "contact",
            CheckoutStep::Confirmation => "confirmation",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Cart => 1,
            CheckoutStep::AddressPayment => 2,
            CheckoutStep::Contact => 3,
            CheckoutStep::Confirmation => 4,
        }
    }

    /// The step that follows this one, if any.
    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => Some(CheckoutStep::AddressPayment),
            CheckoutStep::AddressPayment => Some(CheckoutStep::Contact),
            CheckoutStep::Contact => Some(CheckoutStep::Confirmation),
            CheckoutStep::Confirmation => None,
        }
    }
}

/// Input of the address/payment step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPaymentForm {
    pub address: String,
    pub payment: Option<PaymentMethod>,
}

impl AddressPaymentForm {
    pub fn new(address: impl Into<String>, payment: Option<PaymentMethod>) -> Self {
        Self {
            address: address.into(),
            payment,
        }
    }

    /// Required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.payment.is_none() {
            missing.push("payment method");
        }
        missing
    }

    /// Whether the step's "next" affordance may be enabled.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Input of the contact step. Only emptiness is checked, not format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub email: String,
    pub phone: String,
}

impl ContactForm {
    pub fn new(email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }

    /// Whether the step's "next" affordance may be enabled.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Checkout flow state: the current step plus the order draft.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    draft: OrderDraft,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Create a flow at the cart step with an empty draft.
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Cart,
            draft: OrderDraft::new(),
        }
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Fields committed so far.
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Check if checkout has started and not yet been finished or abandoned.
    pub fn in_progress(&self) -> bool {
        self.step != CheckoutStep::Cart
    }

    /// Start checkout from the cart. The cart must not be empty.
    pub fn begin(&mut self, cart: &Cart) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Cart, CheckoutStep::AddressPayment)?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.move_to(CheckoutStep::AddressPayment);
        Ok(self.step)
    }

    /// Commit address and payment method and move to the contact step.
    pub fn submit_address_payment(
        &mut self,
        form: &AddressPaymentForm,
    ) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::AddressPayment, CheckoutStep::Contact)?;
        let (Some(payment), false) = (form.payment, form.address.trim().is_empty()) else {
            return Err(CommerceError::CheckoutIncomplete(
                form.missing_fields().join(", "),
            ));
        };

        self.draft.address(form.address.trim()).payment(payment);
        self.move_to(CheckoutStep::Contact);
        Ok(self.step)
    }

    /// Commit email and phone plus a snapshot of the cart, and build the order.
    ///
    /// The step stays at `Contact` until [`CheckoutFlow::confirm`] is called,
    /// so a failed submission can be retried.
    pub fn submit_contact(
        &mut self,
        form: &ContactForm,
        cart: &Cart,
    ) -> Result<Order, CommerceError> {
        self.expect_step(CheckoutStep::Contact, CheckoutStep::Confirmation)?;
        if !form.is_complete() {
            return Err(CommerceError::CheckoutIncomplete(
                form.missing_fields().join(", "),
            ));
        }
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        self.draft
            .email(form.email.trim())
            .phone(form.phone.trim())
            .items(cart.items().to_vec());
        self.draft.build()
    }

    /// Mark the order as accepted.
    pub fn confirm(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Contact, CheckoutStep::Confirmation)?;
        self.move_to(CheckoutStep::Confirmation);
        Ok(self.step)
    }

    /// Close the confirmation and start over with a fresh draft.
    pub fn finish(&mut self) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Confirmation {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "finished".to_string(),
            });
        }
        info!("checkout finished");
        *self = Self::new();
        Ok(())
    }

    /// Drop whatever was committed and return to the cart step.
    pub fn abandon(&mut self) {
        if self.in_progress() {
            debug!(step = self.step.as_str(), "checkout abandoned");
        }
        *self = Self::new();
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

    fn move_to(&mut self, step: CheckoutStep) {
        debug!(from = self.step.as_str(), to = step.as_str(), "checkout step");
        self.step = step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn cart_with(prices: &[u64]) -> Cart {
        let mut cart = Cart::new();
        for (i, price) in prices.iter().enumerate() {
            cart.add(Product::new(format!("p{}", i), "Item", *price)).unwrap();
        }
        cart
    }

    fn address_form() -> AddressPaymentForm {
        AddressPaymentForm::new("Спб, Восстания 1", Some(PaymentMethod::Online))
    }

    #[test]
    fn test_step_order() {
        assert_eq!(CheckoutStep::Cart.next(), Some(CheckoutStep::AddressPayment));
        assert_eq!(CheckoutStep::AddressPayment.next(), Some(CheckoutStep::Contact));
        assert_eq!(CheckoutStep::Contact.next(), Some(CheckoutStep::Confirmation));
        assert_eq!(CheckoutStep::Confirmation.next(), None);
        assert_eq!(CheckoutStep::Confirmation.number(), 4);
    }

    #[test]
    fn test_address_form_gate() {
        assert!(!AddressPaymentForm::default().is_complete());
        assert!(!AddressPaymentForm::new("X", None).is_complete());
        assert!(!AddressPaymentForm::new("   ", Some(PaymentMethod::Online)).is_complete());
        assert!(AddressPaymentForm::new("X", Some(PaymentMethod::OnDelivery)).is_complete());
    }

    #[test]
    fn test_contact_form_gate() {
        assert!(!ContactForm::new("", "").is_complete());
        assert!(!ContactForm::new("a@b.c", "").is_complete());
        assert!(!ContactForm::new("", "123").is_complete());
        assert!(ContactForm::new("a@b.c", "123").is_complete());
        assert_eq!(ContactForm::new(" ", "").missing_fields(), vec!["email", "phone"]);
    }

    #[test]
    fn test_begin_requires_items() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.begin(&Cart::new()), Err(CommerceError::EmptyCart));
        assert_eq!(flow.step(), CheckoutStep::Cart);

        assert_eq!(flow.begin(&cart_with(&[100])), Ok(CheckoutStep::AddressPayment));
    }

    #[test]
    fn test_full_flow() {
        let cart = cart_with(&[100, 250]);
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart).unwrap();
        flow.submit_address_payment(&address_form()).unwrap();
        assert_eq!(flow.step(), CheckoutStep::Contact);
        assert_eq!(flow.draft().address_value(), Some("Спб, Восстания 1"));

        let order = flow
            .submit_contact(&ContactForm::new(" a@b.c ", "123"), &cart)
            .unwrap();
        assert_eq!(order.total(), 350);
        assert_eq!(order.email(), "a@b.c");
        assert_eq!(flow.step(), CheckoutStep::Contact);

        flow.confirm().unwrap();
        assert_eq!(flow.step(), CheckoutStep::Confirmation);

        flow.finish().unwrap();
        assert_eq!(flow.step(), CheckoutStep::Cart);
        assert!(flow.draft().is_empty());
    }

    #[test]
    fn test_incomplete_step_rejected() {
        let mut flow = CheckoutFlow::new();
        flow.begin(&cart_with(&[100])).unwrap();

        let err = flow
            .submit_address_payment(&AddressPaymentForm::new("", None))
            .unwrap_err();
        assert_eq!(
            err,
            CommerceError::CheckoutIncomplete("address, payment method".to_string())
        );
        assert_eq!(flow.step(), CheckoutStep::AddressPayment);
        assert!(flow.draft().is_empty());
    }

    #[test]
    fn test_out_of_order_submission_rejected() {
        let cart = cart_with(&[100]);
        let mut flow = CheckoutFlow::new();

        assert!(matches!(
            flow.submit_contact(&ContactForm::new("a@b.c", "1"), &cart),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
        assert!(flow.finish().is_err());
        assert!(flow.confirm().is_err());
    }

    #[test]
    fn test_abandon_discards_draft() {
        let mut flow = CheckoutFlow::new();
        flow.begin(&cart_with(&[100])).unwrap();
        flow.submit_address_payment(&address_form()).unwrap();
        assert!(!flow.draft().is_empty());

        flow.abandon();
        assert_eq!(flow.step(), CheckoutStep::Cart);
        assert!(flow.draft().is_empty());
        assert!(!flow.in_progress());
    }
}
