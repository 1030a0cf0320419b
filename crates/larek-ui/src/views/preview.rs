use larek_commerce::Product;

use super::{ensure_visible, Button};
use crate::dialog::{Dialog, DialogContent, DialogId};
use crate::error::UiError;

const ADD_LABEL: &str = "В корзину";
const IN_CART_LABEL: &str = "Уже в корзине";

/// Product preview dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDialog {
    cdn_url: String,
    visible: bool,
    product: Option<Product>,
    image_url: String,
    button: Button,
}

impl PreviewDialog {
    pub fn new(cdn_url: impl Into<String>) -> Self {
        Self {
            cdn_url: cdn_url.into(),
            visible: false,
            product: None,
            image_url: String::new(),
            button: Button::new(ADD_LABEL, false),
        }
    }

    /// The product on display.
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// The "add to cart" button.
    pub fn button(&self) -> &Button {
        &self.button
    }

    /// Click "add to cart", yielding the product to add.
    pub fn add_clicked(&self) -> Result<Product, UiError> {
        ensure_visible(self.visible, "preview")?;
        self.button.click()?;
        self.product
            .clone()
            .ok_or_else(|| UiError::invalid_use("preview has no product"))
    }
}

impl Dialog for PreviewDialog {
    fn id(&self) -> DialogId {
        DialogId::Preview
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&mut self, content: DialogContent) -> Result<(), UiError> {
        let kind = content.kind();
        let DialogContent::Preview { product, in_cart } = content else {
            return Err(UiError::invalid_use(format!(
                "preview cannot render {kind} content"
            )));
        };

        self.button = if in_cart {
            Button::new(IN_CART_LABEL, false)
        } else {
            Button::new(ADD_LABEL, !product.is_priceless())
        };
        self.image_url = product.image_url(&self.cdn_url);
        self.product = Some(product);
        Ok(())
    }
}
