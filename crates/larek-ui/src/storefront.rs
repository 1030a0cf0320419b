//! The storefront: every view, the cart, the checkout flow and the event
//! wiring between them.
//!
//! All reactions run as bus handlers over [`Shop`]. The public methods of
//! [`Storefront`] are the user's (and the network's) entry points; each one
//! asks a view for the payload of its control and fires the event's trigger.

use larek_commerce::{Cart, CheckoutFlow, CheckoutStep, Order, OrderDraft, PaymentMethod};
use larek_data::{FetchError, OrderReceipt, ProductList};
use tracing::{debug, info, warn};

use crate::bus::{EventBus, EventDef};
use crate::dialog::{Dialog, DialogContent, DialogHost, DialogId, DialogManager};
use crate::error::UiError;
use crate::events::*;
use crate::views::{
    AddressPaymentDialog, CartDialog, CartIcon, CatalogState, CatalogView, ConfirmationDialog,
    ContactDialog, PreviewDialog,
};

/// The five modal dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialogs {
    pub preview: PreviewDialog,
    pub cart: CartDialog,
    pub address_payment: AddressPaymentDialog,
    pub contact: ContactDialog,
    pub confirmation: ConfirmationDialog,
}

impl Dialogs {
    fn new(cdn_url: &str) -> Self {
        Self {
            preview: PreviewDialog::new(cdn_url),
            cart: CartDialog::new(),
            address_payment: AddressPaymentDialog::new(),
            contact: ContactDialog::new(),
            confirmation: ConfirmationDialog::new(),
        }
    }
}

impl DialogHost for Dialogs {
    fn dialog(&self, id: DialogId) -> &dyn Dialog {
        match id {
            DialogId::Preview => &self.preview,
            DialogId::Cart => &self.cart,
            DialogId::AddressPayment => &self.address_payment,
            DialogId::Contact => &self.contact,
            DialogId::Confirmation => &self.confirmation,
        }
    }

    fn dialog_mut(&mut self, id: DialogId) -> &mut dyn Dialog {
        match id {
            DialogId::Preview => &mut self.preview,
            DialogId::Cart => &mut self.cart,
            DialogId::AddressPayment => &mut self.address_payment,
            DialogId::Contact => &mut self.contact,
            DialogId::Confirmation => &mut self.confirmation,
        }
    }
}

/// State the event handlers operate on.
#[derive(Debug, Clone)]
struct Shop {
    catalog: CatalogView,
    cart_icon: CartIcon,
    dialogs: Dialogs,
    manager: DialogManager,
    cart: Cart,
    checkout: CheckoutFlow,
    pending: Option<Order>,
    last_receipt: Option<OrderReceipt>,
}

impl Shop {
    fn new(cdn_url: &str) -> Self {
        Self {
            catalog: CatalogView::new(cdn_url),
            cart_icon: CartIcon::new(),
            dialogs: Dialogs::new(cdn_url),
            manager: DialogManager::new(),
            cart: Cart::new(),
            checkout: CheckoutFlow::new(),
            pending: None,
            last_receipt: None,
        }
    }

    /// Show `id`, replacing the active dialog.
    fn show(&mut self, id: DialogId, content: DialogContent) -> Result<(), UiError> {
        self.leave_for(id)?;
        self.manager.show(&mut self.dialogs, id, content)
    }

    /// Settle the active dialog before `next` replaces it.
    ///
    /// Nothing may replace the contact dialog while its order is being
    /// sent. Leaving a checkout step for anything but the next step
    /// abandons the checkout; leaving the confirmation finishes the order.
    fn leave_for(&mut self, next: DialogId) -> Result<(), UiError> {
        self.ensure_not_sending()?;
        match self.manager.active() {
            Some(active) if advances(active, next) => Ok(()),
            Some(DialogId::Confirmation) => self.finish_order(),
            Some(active) if active.is_checkout_step() => {
                self.abandon_checkout();
                self.close().map(|_| ())
            }
            _ => Ok(()),
        }
    }

    fn ensure_not_sending(&self) -> Result<(), UiError> {
        if self.pending.is_some() {
            return Err(UiError::invalid_use("an order is being sent"));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<DialogId, UiError> {
        self.manager.close(&mut self.dialogs)
    }

    fn sync_cart_icon(&mut self) {
        self.cart_icon.render(self.cart.len());
    }

    /// Drop the draft and any unsent order, keeping the cart.
    fn abandon_checkout(&mut self) {
        if self.checkout.in_progress() {
            info!(step = self.checkout.step().as_str(), "checkout abandoned");
        }
        self.checkout.abandon();
        self.pending = None;
    }

    /// Leave the confirmation: empty the cart and start over.
    fn finish_order(&mut self) -> Result<(), UiError> {
        self.checkout.finish()?;
        self.cart.clear();
        self.sync_cart_icon();
        self.close()?;
        info!("order finished, cart cleared");
        Ok(())
    }
}

fn advances(from: DialogId, to: DialogId) -> bool {
    matches!(
        (from, to),
        (DialogId::AddressPayment, DialogId::Contact) | (DialogId::Contact, DialogId::Confirmation)
    )
}

fn wire(bus: &mut EventBus<Shop>) {
    bus.on::<CatalogLoaded, _>(|shop: &mut Shop, list| {
        if list.total != list.items.len() as u64 {
            debug!(
                total = list.total,
                items = list.items.len(),
                "product count differs from reported total"
            );
        }
        shop.catalog.render(&list.items);
        Ok(())
    });

    bus.on::<CatalogFailed, _>(|shop: &mut Shop, error| {
        warn!(error = %error, "failed to load catalog");
        shop.catalog.render_error(error.to_string());
        Ok(())
    });

    bus.on::<CatalogRetry, _>(|shop: &mut Shop, ()| {
        debug!("catalog reload requested");
        shop.catalog.render_loading();
        Ok(())
    });

    bus.on::<CardSelected, _>(|shop: &mut Shop, product| {
        debug!(product = %product.id, "card selected");
        shop.leave_for(DialogId::Preview)?;
        let in_cart = shop.cart.contains(&product.id);
        shop.show(DialogId::Preview, DialogContent::Preview { product, in_cart })
    });

    bus.on::<CartIconClicked, _>(|shop: &mut Shop, ()| {
        shop.leave_for(DialogId::Cart)?;
        let items = shop.cart.items().to_vec();
        shop.show(DialogId::Cart, DialogContent::Cart { items })
    });

    bus.on::<AddToCart, _>(|shop: &mut Shop, product| {
        let id = product.id.clone();
        shop.cart.add(product)?;
        info!(product = %id, "added to cart");
        shop.sync_cart_icon();
        shop.close()?;
        Ok(())
    });

    bus.on::<RemoveFromCart, _>(|shop: &mut Shop, product| {
        shop.cart.remove(&product.id)?;
        info!(product = %product.id, "removed from cart");
        shop.sync_cart_icon();
        let items = shop.cart.items().to_vec();
        shop.dialogs.cart.render(DialogContent::Cart { items })
    });

    bus.on::<Checkout, _>(|shop: &mut Shop, ()| {
        shop.checkout.begin(&shop.cart)?;
        shop.show(DialogId::AddressPayment, DialogContent::Empty)
    });

    bus.on::<AddressPaymentSubmitted, _>(|shop: &mut Shop, form| {
        shop.checkout.submit_address_payment(&form)?;
        shop.show(DialogId::Contact, DialogContent::Empty)
    });

    bus.on::<ContactSubmitted, _>(|shop: &mut Shop, form| {
        let order = shop.checkout.submit_contact(&form, &shop.cart)?;
        info!(items = order.items().len(), total = order.total(), "order ready to send");
        shop.pending = Some(order);
        shop.dialogs.contact.set_submitting(true);
        Ok(())
    });

    bus.on::<OrderAccepted, _>(|shop: &mut Shop, receipt| {
        if shop.pending.take().is_none() {
            return Err(UiError::invalid_use("no order was being sent"));
        }
        info!(order = %receipt.order_id, total = receipt.total, "order accepted");
        shop.checkout.confirm()?;
        shop.dialogs.contact.set_submitting(false);
        let total = receipt.total;
        shop.last_receipt = Some(receipt);
        shop.show(DialogId::Confirmation, DialogContent::Confirmation { total })
    });

    bus.on::<OrderFailed, _>(|shop: &mut Shop, error| {
        if shop.pending.take().is_none() {
            return Err(UiError::invalid_use("no order was being sent"));
        }
        warn!(error = %error, "order submission failed");
        shop.dialogs.contact.set_submitting(false);
        shop.dialogs.contact.show_error(error.to_string());
        Ok(())
    });

    bus.on::<CloseDialog, _>(|shop: &mut Shop, id| {
        if shop.manager.active() != Some(id) {
            return Err(UiError::invalid_use(format!("{id} dialog is not open")));
        }
        shop.ensure_not_sending()?;
        match id {
            DialogId::Confirmation => shop.finish_order(),
            id if id.is_checkout_step() => {
                shop.abandon_checkout();
                shop.close().map(|_| ())
            }
            _ => shop.close().map(|_| ()),
        }
    });

    bus.on::<ConfirmationClosed, _>(|shop: &mut Shop, ()| shop.finish_order());
}

/// The whole storefront page.
#[derive(Debug)]
pub struct Storefront {
    shop: Shop,
    bus: EventBus<Shop>,
}

impl Storefront {
    /// Create the page with every handler wired. The catalog starts loading.
    pub fn new(cdn_url: impl AsRef<str>) -> Self {
        let mut bus = EventBus::new();
        wire(&mut bus);
        Self {
            shop: Shop::new(cdn_url.as_ref()),
            bus,
        }
    }

    /// Raise `E` through its bus trigger.
    fn fire<E: EventDef>(&mut self, payload: E::Payload) -> Result<(), UiError> {
        let trigger = self.bus.trigger::<E>();
        trigger(&mut self.shop, payload)
    }

    // Read access for presenters.

    pub fn catalog(&self) -> &CatalogView {
        &self.shop.catalog
    }

    pub fn cart_icon(&self) -> &CartIcon {
        &self.shop.cart_icon
    }

    pub fn cart(&self) -> &Cart {
        &self.shop.cart
    }

    pub fn dialogs(&self) -> &Dialogs {
        &self.shop.dialogs
    }

    /// The dialog currently on screen.
    pub fn active_dialog(&self) -> Option<DialogId> {
        self.shop.manager.active()
    }

    /// Ids of all visible dialogs; never more than one.
    pub fn visible_dialogs(&self) -> Vec<DialogId> {
        self.shop.dialogs.visible()
    }

    pub fn checkout_step(&self) -> CheckoutStep {
        self.shop.checkout.step()
    }

    pub fn draft(&self) -> &OrderDraft {
        self.shop.checkout.draft()
    }

    /// The order waiting to be sent, if any.
    pub fn pending_order(&self) -> Option<&Order> {
        self.shop.pending.as_ref()
    }

    /// Receipt of the last accepted order.
    pub fn last_receipt(&self) -> Option<&OrderReceipt> {
        self.shop.last_receipt.as_ref()
    }

    /// Check if the catalog is waiting for a product list.
    pub fn catalog_requested(&self) -> bool {
        matches!(self.shop.catalog.state(), CatalogState::Loading)
    }

    // Network completions.

    pub fn catalog_loaded(&mut self, result: Result<ProductList, FetchError>) -> Result<(), UiError> {
        match result {
            Ok(list) => self.fire::<CatalogLoaded>(list),
            Err(error) => self.fire::<CatalogFailed>(error),
        }
    }

    pub fn order_submitted(&mut self, result: Result<OrderReceipt, FetchError>) -> Result<(), UiError> {
        match result {
            Ok(receipt) => self.fire::<OrderAccepted>(receipt),
            Err(error) => self.fire::<OrderFailed>(error),
        }
    }

    // User interactions.

    pub fn retry_catalog(&mut self) -> Result<(), UiError> {
        self.shop.catalog.retry()?;
        self.fire::<CatalogRetry>(())
    }

    pub fn click_card(&mut self, index: usize) -> Result<(), UiError> {
        let product = self.shop.catalog.click(index)?;
        self.fire::<CardSelected>(product)
    }

    pub fn click_cart_icon(&mut self) -> Result<(), UiError> {
        self.fire::<CartIconClicked>(())
    }

    /// "Add to cart" in the preview.
    pub fn add_to_cart(&mut self) -> Result<(), UiError> {
        let product = self.shop.dialogs.preview.add_clicked()?;
        self.fire::<AddToCart>(product)
    }

    /// Delete the cart row at `index` (0-based).
    pub fn remove_cart_row(&mut self, index: usize) -> Result<(), UiError> {
        let product = self.shop.dialogs.cart.delete_clicked(index)?;
        self.fire::<RemoveFromCart>(product)
    }

    pub fn checkout(&mut self) -> Result<(), UiError> {
        self.shop.dialogs.cart.checkout_clicked()?;
        self.fire::<Checkout>(())
    }

    pub fn input_address(&mut self, text: &str) -> Result<(), UiError> {
        self.shop.dialogs.address_payment.input_address(text)
    }

    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), UiError> {
        self.shop.dialogs.address_payment.select_payment(method)
    }

    pub fn submit_address_payment(&mut self) -> Result<(), UiError> {
        let form = self.shop.dialogs.address_payment.next_clicked()?;
        self.fire::<AddressPaymentSubmitted>(form)
    }

    pub fn input_email(&mut self, text: &str) -> Result<(), UiError> {
        self.shop.dialogs.contact.input_email(text)
    }

    pub fn input_phone(&mut self, text: &str) -> Result<(), UiError> {
        self.shop.dialogs.contact.input_phone(text)
    }

    /// "Pay" in the contact step. On success an order is pending; the
    /// caller sends it and reports back through [`Storefront::order_submitted`].
    pub fn submit_contact(&mut self) -> Result<(), UiError> {
        let form = self.shop.dialogs.contact.next_clicked()?;
        self.fire::<ContactSubmitted>(form)
    }

    /// The close control of whichever dialog is open.
    pub fn close_dialog(&mut self) -> Result<(), UiError> {
        let id = self
            .shop
            .manager
            .active()
            .ok_or_else(|| UiError::invalid_use("no dialog is open"))?;
        self.fire::<CloseDialog>(id)
    }

    /// The confirmation's own "continue shopping" button.
    pub fn close_confirmation(&mut self) -> Result<(), UiError> {
        self.shop.dialogs.confirmation.close_clicked()?;
        self.fire::<ConfirmationClosed>(())
    }
}
