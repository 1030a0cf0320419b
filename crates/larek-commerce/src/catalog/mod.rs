//! Catalog module.
//!
//! Contains the product record fetched from the catalog endpoint.

mod product;

pub use product::Product;
