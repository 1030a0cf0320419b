//! View-models for the page and its dialogs.
//!
//! Each view holds exactly what a presenter needs to draw it. Interaction
//! methods validate that the control is usable and return the payload of
//! the event the control raises.

mod cart;
mod cart_icon;
mod catalog;
mod checkout;
mod confirmation;
mod preview;

pub use cart::{CartDialog, CartRow};
pub use cart_icon::CartIcon;
pub use catalog::{CatalogCard, CatalogState, CatalogView};
pub use checkout::{AddressPaymentDialog, ContactDialog};
pub use confirmation::ConfirmationDialog;
pub use preview::PreviewDialog;

use crate::error::UiError;

/// A clickable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub enabled: bool,
}

impl Button {
    pub const fn new(label: &'static str, enabled: bool) -> Self {
        Self { label, enabled }
    }

    /// Fail unless the button can be clicked.
    pub(crate) fn click(&self) -> Result<(), UiError> {
        if self.enabled {
            Ok(())
        } else {
            Err(UiError::invalid_use(format!(
                "button '{}' is disabled",
                self.label
            )))
        }
    }
}

/// Fail unless the dialog is on screen.
pub(crate) fn ensure_visible(visible: bool, name: &str) -> Result<(), UiError> {
    if visible {
        Ok(())
    } else {
        Err(UiError::invalid_use(format!("{name} dialog is not open")))
    }
}
