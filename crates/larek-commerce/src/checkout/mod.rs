//! Checkout module.
//!
//! Contains the checkout step machine, the per-step forms, the payment
//! method and the order draft/order pair.

mod flow;
mod order;
mod payment;

pub use flow::{AddressPaymentForm, CheckoutFlow, CheckoutStep, ContactForm};
pub use order::{Order, OrderDraft};
pub use payment::PaymentMethod;
