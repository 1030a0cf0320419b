//! Modal dialogs and the manager that keeps at most one of them open.

use std::fmt;

use larek_commerce::Product;
use tracing::debug;

use crate::error::UiError;

/// The storefront's modal dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogId {
    Preview,
    Cart,
    AddressPayment,
    Contact,
    Confirmation,
}

impl DialogId {
    pub const ALL: [DialogId; 5] = [
        DialogId::Preview,
        DialogId::Cart,
        DialogId::AddressPayment,
        DialogId::Contact,
        DialogId::Confirmation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DialogId::Preview => "preview",
            DialogId::Cart => "cart",
            DialogId::AddressPayment => "address_payment",
            DialogId::Contact => "contact",
            DialogId::Confirmation => "confirmation",
        }
    }

    /// Whether closing this dialog abandons a checkout in progress.
    pub fn is_checkout_step(&self) -> bool {
        matches!(self, DialogId::AddressPayment | DialogId::Contact)
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data a dialog is rendered with when shown.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogContent {
    /// No data; forms start blank.
    Empty,
    Preview { product: Product, in_cart: bool },
    Cart { items: Vec<Product> },
    Confirmation { total: u64 },
}

impl DialogContent {
    pub fn kind(&self) -> &'static str {
        match self {
            DialogContent::Empty => "empty",
            DialogContent::Preview { .. } => "preview",
            DialogContent::Cart { .. } => "cart",
            DialogContent::Confirmation { .. } => "confirmation",
        }
    }
}

/// A modal dialog.
pub trait Dialog {
    fn id(&self) -> DialogId;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    /// Called when the dialog is about to be shown, before `render`.
    fn on_show(&mut self) {}

    /// Called after the dialog was hidden.
    fn on_hide(&mut self) {}

    /// Fill the dialog from `content`.
    fn render(&mut self, content: DialogContent) -> Result<(), UiError>;
}

/// Something that owns dialogs and hands them out by id.
pub trait DialogHost {
    fn dialog(&self, id: DialogId) -> &dyn Dialog;

    fn dialog_mut(&mut self, id: DialogId) -> &mut dyn Dialog;

    /// Ids of currently visible dialogs.
    fn visible(&self) -> Vec<DialogId> {
        DialogId::ALL
            .into_iter()
            .filter(|id| self.dialog(*id).is_visible())
            .collect()
    }
}

/// Tracks the single active dialog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DialogManager {
    active: Option<DialogId>,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<DialogId> {
        self.active
    }

    /// Show dialog `id` rendered with `content`, hiding whatever was open.
    pub fn show<H: DialogHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: DialogId,
        content: DialogContent,
    ) -> Result<(), UiError> {
        if self.active.is_some() {
            self.close(host)?;
        }

        let dialog = host.dialog_mut(id);
        dialog.on_show();
        if let Err(e) = dialog.render(content) {
            dialog.on_hide();
            return Err(e);
        }
        dialog.set_visible(true);
        self.active = Some(id);

        debug!(dialog = %id, "dialog shown");
        Ok(())
    }

    /// Hide the active dialog and return its id.
    pub fn close<H: DialogHost + ?Sized>(&mut self, host: &mut H) -> Result<DialogId, UiError> {
        let id = self
            .active
            .take()
            .ok_or_else(|| UiError::invalid_use("close called with no active dialog"))?;

        let dialog = host.dialog_mut(id);
        dialog.set_visible(false);
        dialog.on_hide();

        debug!(dialog = %id, "dialog closed");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Stub {
        id: Option<DialogId>,
        visible: bool,
        shows: u32,
        hides: u32,
        rendered: Option<DialogContent>,
    }

    impl Dialog for Stub {
        fn id(&self) -> DialogId {
            self.id.unwrap_or(DialogId::Preview)
        }

        fn is_visible(&self) -> bool {
            self.visible
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn on_show(&mut self) {
            self.shows += 1;
        }

        fn on_hide(&mut self) {
            self.hides += 1;
        }

        fn render(&mut self, content: DialogContent) -> Result<(), UiError> {
            if content == (DialogContent::Confirmation { total: 0 }) {
                return Err(UiError::invalid_use("bad content"));
            }
            self.rendered = Some(content);
            Ok(())
        }
    }

    struct Host(Vec<Stub>);

    impl Host {
        fn new() -> Self {
            Host(
                DialogId::ALL
                    .into_iter()
                    .map(|id| Stub {
                        id: Some(id),
                        ..Stub::default()
                    })
                    .collect(),
            )
        }

        fn stub(&self, id: DialogId) -> &Stub {
            &self.0[DialogId::ALL.iter().position(|d| *d == id).unwrap()]
        }
    }

    impl DialogHost for Host {
        fn dialog(&self, id: DialogId) -> &dyn Dialog {
            self.stub(id)
        }

        fn dialog_mut(&mut self, id: DialogId) -> &mut dyn Dialog {
            let index = DialogId::ALL.iter().position(|d| *d == id).unwrap();
            &mut self.0[index]
        }
    }

    #[test]
    fn test_show_renders_and_activates() {
        let mut host = Host::new();
        let mut manager = DialogManager::new();

        manager
            .show(&mut host, DialogId::Cart, DialogContent::Cart { items: vec![] })
            .unwrap();

        assert_eq!(manager.active(), Some(DialogId::Cart));
        assert_eq!(host.visible(), vec![DialogId::Cart]);
        let cart = host.stub(DialogId::Cart);
        assert_eq!(cart.shows, 1);
        assert_eq!(cart.rendered, Some(DialogContent::Cart { items: vec![] }));
    }

    #[test]
    fn test_show_replaces_active_dialog() {
        let mut host = Host::new();
        let mut manager = DialogManager::new();

        manager.show(&mut host, DialogId::Cart, DialogContent::Empty).unwrap();
        manager
            .show(&mut host, DialogId::AddressPayment, DialogContent::Empty)
            .unwrap();

        assert_eq!(manager.active(), Some(DialogId::AddressPayment));
        assert_eq!(host.visible(), vec![DialogId::AddressPayment]);
        assert_eq!(host.stub(DialogId::Cart).hides, 1);
    }

    #[test]
    fn test_close_without_active_dialog_fails() {
        let mut host = Host::new();
        let mut manager = DialogManager::new();

        assert!(matches!(
            manager.close(&mut host),
            Err(UiError::InvalidUse(_))
        ));
    }

    #[test]
    fn test_close_hides_and_clears() {
        let mut host = Host::new();
        let mut manager = DialogManager::new();

        manager.show(&mut host, DialogId::Contact, DialogContent::Empty).unwrap();
        assert_eq!(manager.close(&mut host).unwrap(), DialogId::Contact);

        assert_eq!(manager.active(), None);
        assert!(host.visible().is_empty());
    }

    #[test]
    fn test_failed_render_leaves_nothing_active() {
        let mut host = Host::new();
        let mut manager = DialogManager::new();

        manager.show(&mut host, DialogId::Cart, DialogContent::Empty).unwrap();
        let result = manager.show(
            &mut host,
            DialogId::Confirmation,
            DialogContent::Confirmation { total: 0 },
        );

        assert!(result.is_err());
        assert_eq!(manager.active(), None);
        assert!(host.visible().is_empty());
    }
}
