use larek_commerce::price::{price_label, try_sum};
use larek_commerce::{CommerceError, Product};

use super::{ensure_visible, Button};
use crate::dialog::{Dialog, DialogContent, DialogId};
use crate::error::UiError;

const CHECKOUT_LABEL: &str = "Оформить";

/// One line of the cart list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// 1-based position.
    pub index: usize,
    pub title: String,
    pub price_label: String,
}

/// Cart dialog: item list, total and the checkout button.
#[derive(Debug, Clone, PartialEq)]
pub struct CartDialog {
    visible: bool,
    items: Vec<Product>,
    rows: Vec<CartRow>,
    total_label: String,
    checkout: Button,
}

impl Default for CartDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl CartDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            items: Vec::new(),
            rows: Vec::new(),
            total_label: String::new(),
            checkout: Button::new(CHECKOUT_LABEL, false),
        }
    }

    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    /// Formatted total; empty when the list is empty.
    pub fn total_label(&self) -> &str {
        &self.total_label
    }

    pub fn checkout_button(&self) -> &Button {
        &self.checkout
    }

    /// Click the delete control of the row at `index` (0-based).
    ///
    /// Returns the row's product. The list is left as is until the next
    /// render.
    pub fn delete_clicked(&self, index: usize) -> Result<Product, UiError> {
        ensure_visible(self.visible, "cart")?;
        self.items
            .get(index)
            .cloned()
            .ok_or_else(|| UiError::invalid_use(format!("no cart row at index {index}")))
    }

    /// Click "checkout".
    pub fn checkout_clicked(&self) -> Result<(), UiError> {
        ensure_visible(self.visible, "cart")?;
        self.checkout.click()
    }

    fn rebuild(&mut self) -> Result<(), UiError> {
        self.rows = self
            .items
            .iter()
            .enumerate()
            .map(|(i, p)| CartRow {
                index: i + 1,
                title: p.title.clone(),
                price_label: p.price_label(),
            })
            .collect();

        if self.items.is_empty() {
            self.total_label.clear();
            self.checkout = Button::new(CHECKOUT_LABEL, false);
        } else {
            let total =
                try_sum(self.items.iter().map(|p| p.price)).ok_or(CommerceError::Overflow)?;
            self.total_label = price_label(total);
            self.checkout = Button::new(CHECKOUT_LABEL, true);
        }
        Ok(())
    }
}

impl Dialog for CartDialog {
    fn id(&self) -> DialogId {
        DialogId::Cart
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&mut self, content: DialogContent) -> Result<(), UiError> {
        let kind = content.kind();
        let DialogContent::Cart { items } = content else {
            return Err(UiError::invalid_use(format!(
                "cart cannot render {kind} content"
            )));
        };
        self.items = items;
        self.rebuild()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(items: Vec<Product>) -> CartDialog {
        let mut dialog = CartDialog::new();
        dialog.render(DialogContent::Cart { items }).unwrap();
        dialog.set_visible(true);
        dialog
    }

    #[test]
    fn test_rows_and_total() {
        let dialog = open(vec![
            Product::new("a", "Кнопка «Замьютить кота»", 2000),
            Product::new("b", "БЭМ-пилюлька", 1500),
        ]);

        assert_eq!(dialog.rows().len(), 2);
        assert_eq!(dialog.rows()[1].index, 2);
        assert_eq!(dialog.rows()[1].title, "БЭМ-пилюлька");
        assert_eq!(dialog.rows()[1].price_label, "1500 синапсов");
        assert_eq!(dialog.total_label(), "3500 синапсов");
        assert!(dialog.checkout_button().enabled);
    }

    #[test]
    fn test_empty_cart_disables_checkout() {
        let dialog = open(vec![]);

        assert!(dialog.rows().is_empty());
        assert_eq!(dialog.total_label(), "");
        assert!(dialog.checkout_clicked().is_err());
    }

    #[test]
    fn test_delete_reports_row_and_keeps_list() {
        let mut dialog = open(vec![
            Product::new("a", "A", 100),
            Product::new("b", "B", 250),
            Product::new("c", "C", 1),
        ]);

        let removed = dialog.delete_clicked(1).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(dialog.rows().len(), 3);
        assert!(dialog.delete_clicked(3).is_err());

        dialog
            .render(DialogContent::Cart {
                items: vec![Product::new("a", "A", 100), Product::new("c", "C", 1)],
            })
            .unwrap();
        assert_eq!(dialog.rows()[1].index, 2);
        assert_eq!(dialog.rows()[1].title, "C");
        assert_eq!(dialog.total_label(), "101 синапс");

        dialog.render(DialogContent::Cart { items: vec![] }).unwrap();
        assert_eq!(dialog.total_label(), "");
        assert!(!dialog.checkout_button().enabled);
        assert!(dialog.delete_clicked(0).is_err());
    }

    #[test]
    fn test_hidden_dialog_ignores_clicks() {
        let mut dialog = CartDialog::new();
        dialog
            .render(DialogContent::Cart {
                items: vec![Product::new("a", "A", 100)],
            })
            .unwrap();

        assert!(dialog.checkout_clicked().is_err());
    }
}
