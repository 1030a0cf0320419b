//! The storefront's event table.
//!
//! One marker type per event, each bound to its name and payload. Views
//! produce payloads; the storefront subscribes one handler per event.

use larek_commerce::{AddressPaymentForm, ContactForm, Product};
use larek_data::{FetchError, OrderReceipt, ProductList};

use crate::dialog::DialogId;

crate::define_events! {
    /// The product list arrived.
    CatalogLoaded = "catalog:loaded" => ProductList;
    /// The product list could not be fetched.
    CatalogFailed = "catalog:failed" => FetchError;
    /// The user asked to fetch the product list again.
    CatalogRetry = "catalog:retry" => ();
    /// A catalog card was clicked.
    CardSelected = "catalog:selected" => Product;

    /// The header cart icon was clicked.
    CartIconClicked = "header:cart" => ();

    /// "Add to cart" was clicked in the preview dialog.
    AddToCart = "preview:in-cart" => Product;

    /// A row's delete control was clicked in the cart dialog.
    RemoveFromCart = "cart:remove-item" => Product;
    /// The checkout button was clicked in the cart dialog.
    Checkout = "cart:checkout" => ();

    /// The address/payment step's "next" was clicked.
    AddressPaymentSubmitted = "address-payment:submit" => AddressPaymentForm;
    /// The contact step's "next" was clicked.
    ContactSubmitted = "contact:submit" => ContactForm;

    /// The server accepted the pending order.
    OrderAccepted = "order:accepted" => OrderReceipt;
    /// Sending the pending order failed.
    OrderFailed = "order:failed" => FetchError;

    /// A dialog's close control was clicked.
    CloseDialog = "dialog:close" => DialogId;
    /// The confirmation dialog's own close button was clicked.
    ConfirmationClosed = "confirmation:close" => ();
}
