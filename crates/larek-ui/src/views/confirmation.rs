use larek_commerce::charged_label;

use super::{ensure_visible, Button};
use crate::dialog::{Dialog, DialogContent, DialogId};
use crate::error::UiError;

pub const CONFIRMATION_TITLE: &str = "Заказ оформлен";
const CLOSE_LABEL: &str = "За новыми покупками!";

/// Order confirmation with the amount charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialog {
    visible: bool,
    description: String,
    close: Button,
}

impl Default for ConfirmationDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            description: String::new(),
            close: Button::new(CLOSE_LABEL, true),
        }
    }

    pub fn title(&self) -> &'static str {
        CONFIRMATION_TITLE
    }

    /// "Списано N синапсов".
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn close_button(&self) -> &Button {
        &self.close
    }

    pub fn close_clicked(&self) -> Result<(), UiError> {
        ensure_visible(self.visible, "confirmation")?;
        self.close.click()
    }
}

impl Dialog for ConfirmationDialog {
    fn id(&self) -> DialogId {
        DialogId::Confirmation
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&mut self, content: DialogContent) -> Result<(), UiError> {
        match content {
            DialogContent::Confirmation { total } => {
                self.description = charged_label(total);
                Ok(())
            }
            other => Err(UiError::invalid_use(format!(
                "confirmation cannot render {} content",
                other.kind()
            ))),
        }
    }
}
