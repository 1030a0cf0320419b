//! Product type.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ProductId;
use crate::price::price_label;

/// A product in the catalog.
///
/// Products are created from the catalog response and never mutated.
/// Two products are the same product when their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend-issued product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Long description shown in the preview.
    #[serde(default)]
    pub description: String,
    /// Category name, e.g. "софт-скил".
    #[serde(default)]
    pub category: String,
    /// Image path relative to the CDN root.
    #[serde(default)]
    pub image: String,
    /// Price in synapses; 0 (or `null` on the wire) means priceless.
    #[serde(default, deserialize_with = "price_or_priceless")]
    pub price: u64,
}

impl Product {
    /// Create a product with an id, title and price.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            image: String::new(),
            price,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the image path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Check if the product has no price and therefore cannot be bought.
    pub fn is_priceless(&self) -> bool {
        self.price == 0
    }

    /// Formatted price label.
    pub fn price_label(&self) -> String {
        price_label(self.price)
    }

    /// Full image URL under the given CDN root.
    pub fn image_url(&self, cdn_url: &str) -> String {
        if self.image.starts_with("http://") || self.image.starts_with("https://") {
            return self.image.clone();
        }
        format!(
            "{}/{}",
            cdn_url.trim_end_matches('/'),
            self.image.trim_start_matches('/')
        )
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn price_or_priceless<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_item() {
        let json = r#"{
            "id": "854cef69-976d-4c2a-a18c-2aa45046c390",
            "description": "Если планируете решать задачи в тренажёре, берите два.",
            "image": "/5_Dots.svg",
            "title": "+1 час в сутках",
            "category": "софт-скил",
            "price": 750
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "854cef69-976d-4c2a-a18c-2aa45046c390");
        assert_eq!(product.title, "+1 час в сутках");
        assert_eq!(product.category, "софт-скил");
        assert_eq!(product.price, 750);
        assert_eq!(product.price_label(), "750 синапсов");
    }

    #[test]
    fn test_null_price_is_priceless() {
        let json = r#"{"id": "p1", "title": "Мамка-таймер", "price": null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, 0);
        assert!(product.is_priceless());
        assert_eq!(product.price_label(), "бесценно");
    }

    #[test]
    fn test_identity_by_id() {
        let a = Product::new("p1", "A", 100);
        let b = Product::new("p1", "renamed", 999);
        let c = Product::new("p2", "A", 100);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_image_url() {
        let product = Product::new("p1", "A", 1).with_image("/5_Dots.svg");
        assert_eq!(
            product.image_url("https://larek-api.nomoreparties.co/content/weblarek/"),
            "https://larek-api.nomoreparties.co/content/weblarek/5_Dots.svg"
        );

        let absolute = Product::new("p2", "B", 1).with_image("https://cdn.example/x.png");
        assert_eq!(absolute.image_url("https://other"), "https://cdn.example/x.png");
    }
}
