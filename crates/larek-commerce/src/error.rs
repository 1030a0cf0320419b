//! Commerce error types.

use thiserror::Error;

/// Errors raised by the storefront domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product is already in the cart.
    #[error("Product already in cart: {0}")]
    AlreadyInCart(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Checkout was requested for an empty cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A checkout step was submitted without its required fields.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// `OrderDraft::build` was called before every field was set.
    #[error("Order incomplete: missing {0}")]
    OrderIncomplete(String),

    /// Arithmetic overflow while summing prices.
    #[error("Arithmetic overflow in price calculation")]
    Overflow,
}
