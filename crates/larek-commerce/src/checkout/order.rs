//! Order draft and finished order.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::checkout::PaymentMethod;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::price::try_sum;

/// Accumulates checkout fields while the customer moves through the steps.
///
/// Each step commits its fields as soon as it is submitted. There is no reset:
/// once an order is finished or abandoned the draft is dropped and replaced
/// by a new one, so nothing carries over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    items: Option<Vec<Product>>,
    address: Option<String>,
    payment: Option<PaymentMethod>,
    email: Option<String>,
    phone: Option<String>,
}

impl OrderDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cart snapshot.
    pub fn items(&mut self, items: Vec<Product>) -> &mut Self {
        self.items = Some(items);
        self
    }

    /// Set the delivery address.
    pub fn address(&mut self, address: impl Into<String>) -> &mut Self {
        self.address = Some(address.into());
        self
    }

    /// Set the payment method.
    pub fn payment(&mut self, payment: PaymentMethod) -> &mut Self {
        self.payment = Some(payment);
        self
    }

    /// Set the contact email.
    pub fn email(&mut self, email: impl Into<String>) -> &mut Self {
        self.email = Some(email.into());
        self
    }

    /// Set the contact phone.
    pub fn phone(&mut self, phone: impl Into<String>) -> &mut Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn address_value(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn payment_value(&self) -> Option<PaymentMethod> {
        self.payment
    }

    pub fn email_value(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone_value(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Check if no field has been set yet.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Fields that have not been set.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.items.is_none() {
            missing.push("items");
        }
        if self.address.is_none() {
            missing.push("address");
        }
        if self.payment.is_none() {
            missing.push("payment method");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        if self.phone.is_none() {
            missing.push("phone");
        }
        missing
    }

    /// Produce the finished order.
    ///
    /// Only presence is checked; the checkout steps gate the field contents.
    /// The total is the sum of the snapshot's prices at build time.
    pub fn build(&self) -> Result<Order, CommerceError> {
        let (Some(items), Some(address), Some(payment), Some(email), Some(phone)) = (
            self.items.as_ref(),
            self.address.as_ref(),
            self.payment,
            self.email.as_ref(),
            self.phone.as_ref(),
        ) else {
            return Err(CommerceError::OrderIncomplete(
                self.missing_fields().join(", "),
            ));
        };

        let total = try_sum(items.iter().map(|p| p.price)).ok_or(CommerceError::Overflow)?;

        Ok(Order {
            items: items.clone(),
            total,
            address: address.clone(),
            payment,
            email: email.clone(),
            phone: phone.clone(),
        })
    }
}

/// A finished order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    items: Vec<Product>,
    total: u64,
    address: String,
    payment: PaymentMethod,
    email: String,
    phone: String,
}

impl Order {
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Ids of the ordered items, in cart order.
    pub fn item_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|p| p.id.clone()).collect()
    }

    /// Sum of item prices.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}
