//! Storefront domain types and logic for Larek.
//!
//! This crate provides the plain-data side of the shop, with no I/O:
//!
//! - **Catalog**: the immutable `Product` record
//! - **Cart**: ordered, duplicate-free product list with a running total
//! - **Checkout**: linear step machine, step forms, `OrderDraft` and `Order`
//! - **Price**: synapse price labels with Russian plural forms
//!
//! # Example
//!
//! ```rust
//! use larek_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add(Product::new("p1", "+1 час в сутках", 750)).unwrap();
//!
//! let mut flow = CheckoutFlow::new();
//! flow.begin(&cart).unwrap();
//! flow.submit_address_payment(&AddressPaymentForm::new("Москва", Some(PaymentMethod::Online)))
//!     .unwrap();
//! let order = flow
//!     .submit_contact(&ContactForm::new("a@b.c", "+7 900 000-00-00"), &cart)
//!     .unwrap();
//!
//! assert_eq!(price_label(order.total()), "750 синапсов");
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::Cart;
pub use catalog::Product;
pub use checkout::{
    AddressPaymentForm, CheckoutFlow, CheckoutStep, ContactForm, Order, OrderDraft, PaymentMethod,
};
pub use error::CommerceError;
pub use ids::*;
pub use price::{charged_label, price_label};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::price::{charged_label, price_label};

    pub use crate::cart::Cart;
    pub use crate::catalog::Product;
    pub use crate::checkout::{
        AddressPaymentForm, CheckoutFlow, CheckoutStep, ContactForm, Order, OrderDraft,
        PaymentMethod,
    };
}
