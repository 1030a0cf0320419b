//! Cart module.

mod cart;

pub use cart::Cart;
