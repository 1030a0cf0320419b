//! Shopping cart.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::price::try_sum;

/// An in-memory shopping cart.
///
/// Holds products in the order they were added. A product appears at most
/// once; there are no quantities. The cart lives for one session only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the end of the cart.
    ///
    /// Returns an error if a product with the same id is already present.
    pub fn add(&mut self, product: Product) -> Result<(), CommerceError> {
        if self.contains(&product.id) {
            return Err(CommerceError::AlreadyInCart(product.id.to_string()));
        }
        debug!(product_id = %product.id, price = product.price, "cart add");
        self.items.push(product);
        Ok(())
    }

    /// Remove a product by id, returning it.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<Product, CommerceError> {
        let index = self
            .items
            .iter()
            .position(|p| &p.id == product_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(product_id.to_string()))?;
        debug!(product_id = %product_id, "cart remove");
        Ok(self.items.remove(index))
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Ids of the items in insertion order.
    pub fn item_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|p| p.id.clone()).collect()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices.
    pub fn total(&self) -> Result<u64, CommerceError> {
        try_sum(self.items.iter().map(|p| p.price)).ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: u64) -> Product {
        Product::new(id, format!("Product {}", id), price)
    }

    #[test]
    fn test_cart_starts_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total().unwrap(), 0);
    }

    #[test]
    fn test_add_keeps_order() {
        let mut cart = Cart::new();
        cart.add(product("a", 100)).unwrap();
        cart.add(product("b", 250)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut cart = Cart::new();
        cart.add(product("a", 100)).unwrap();
        let result = cart.add(product("a", 100));
        assert_eq!(result, Err(CommerceError::AlreadyInCart("a".to_string())));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add(product("a", 100)).unwrap();
        cart.add(product("b", 250)).unwrap();

        let removed = cart.remove(&ProductId::new("a")).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(cart.item_ids(), vec![ProductId::new("b")]);
    }

    #[test]
    fn test_remove_missing_item() {
        let mut cart = Cart::new();
        assert!(cart.remove(&ProductId::new("missing")).is_err());
    }

    #[test]
    fn test_total_tracks_add_and_remove() {
        let mut cart = Cart::new();
        let ops: [(&str, u64, bool); 6] = [
            ("a", 100, true),
            ("b", 250, true),
            ("c", 0, true),
            ("a", 100, false),
            ("d", 1450, true),
            ("c", 0, false),
        ];

        for (id, price, add) in ops {
            if add {
                cart.add(product(id, price)).unwrap();
            } else {
                cart.remove(&ProductId::new(id)).unwrap();
            }
            let expected: u64 = cart.items().iter().map(|p| p.price).sum();
            assert_eq!(cart.total().unwrap(), expected);
        }
        assert_eq!(cart.total().unwrap(), 1700);
    }

    #[test]
    fn test_total_overflow() {
        let mut cart = Cart::new();
        cart.add(product("a", u64::MAX)).unwrap();
        cart.add(product("b", 1)).unwrap();
        assert_eq!(cart.total(), Err(CommerceError::Overflow));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(product("a", 100)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }
}
