use larek_commerce::Product;
use tracing::debug;

use crate::error::UiError;

/// Load state of the product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    /// Waiting for the product list.
    Loading,
    Ready,
    /// Fetch failed; the user may retry.
    Failed { message: String },
}

/// One product card in the catalog grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCard {
    pub category: String,
    pub title: String,
    pub image_url: String,
    pub price_label: String,
    product: Product,
}

impl CatalogCard {
    fn new(product: &Product, cdn_url: &str) -> Self {
        Self {
            category: product.category.clone(),
            title: product.title.clone(),
            image_url: product.image_url(cdn_url),
            price_label: product.price_label(),
            product: product.clone(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }
}

/// The catalog grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    cdn_url: String,
    state: CatalogState,
    cards: Vec<CatalogCard>,
}

impl CatalogView {
    pub fn new(cdn_url: impl Into<String>) -> Self {
        Self {
            cdn_url: cdn_url.into(),
            state: CatalogState::Loading,
            cards: Vec::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn cards(&self) -> &[CatalogCard] {
        &self.cards
    }

    /// Replace all cards with one card per product, in order.
    pub fn render(&mut self, items: &[Product]) {
        self.cards = items
            .iter()
            .map(|p| CatalogCard::new(p, &self.cdn_url))
            .collect();
        self.state = CatalogState::Ready;
        debug!(cards = self.cards.len(), "catalog rendered");
    }

    pub fn render_loading(&mut self) {
        self.state = CatalogState::Loading;
    }

    /// Show a fetch failure. Cards from an earlier load stay.
    pub fn render_error(&mut self, message: impl Into<String>) {
        self.state = CatalogState::Failed {
            message: message.into(),
        };
    }

    /// Click the card at `index`, yielding its product.
    pub fn click(&self, index: usize) -> Result<Product, UiError> {
        self.cards
            .get(index)
            .map(|card| card.product.clone())
            .ok_or_else(|| UiError::invalid_use(format!("no catalog card at index {index}")))
    }

    /// Click "retry"; only offered after a failed fetch.
    pub fn retry(&self) -> Result<(), UiError> {
        match self.state {
            CatalogState::Failed { .. } => Ok(()),
            _ => Err(UiError::invalid_use("catalog has not failed to load")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new("a", "Фреймворк куки судьбы", 2500)
                .with_category("софт-скил")
                .with_image("/5_Dots.svg"),
            Product::new("b", "Мамка-таймер", 0).with_category("другое"),
        ]
    }

    #[test]
    fn test_render_builds_cards_in_order() {
        let mut view = CatalogView::new("https://cdn.example");
        assert_eq!(view.state(), &CatalogState::Loading);

        view.render(&products());

        assert_eq!(view.state(), &CatalogState::Ready);
        assert_eq!(view.cards().len(), 2);
        let first = &view.cards()[0];
        assert_eq!(first.title, "Фреймворк куки судьбы");
        assert_eq!(first.category, "софт-скил");
        assert_eq!(first.image_url, "https://cdn.example/5_Dots.svg");
        assert_eq!(first.price_label, "2500 синапсов");
        assert_eq!(view.cards()[1].price_label, "бесценно");
    }

    #[test]
    fn test_render_replaces_previous_cards() {
        let mut view = CatalogView::new("");
        view.render(&products());
        view.render(&products()[..1]);

        assert_eq!(view.cards().len(), 1);
    }

    #[test]
    fn test_click_yields_product() {
        let mut view = CatalogView::new("");
        view.render(&products());

        assert_eq!(view.click(1).unwrap().id.as_str(), "b");
        assert!(view.click(2).is_err());
    }

    #[test]
    fn test_retry_only_after_failure() {
        let mut view = CatalogView::new("");
        assert!(view.retry().is_err());

        view.render_error("connection refused");
        assert!(view.retry().is_ok());
        assert_eq!(
            view.state(),
            &CatalogState::Failed {
                message: "connection refused".to_string()
            }
        );
    }
}
