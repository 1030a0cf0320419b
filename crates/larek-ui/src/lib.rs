//! Headless presentation core for the Larek storefront.
//!
//! The page is modelled as plain view structs that a presenter draws:
//!
//! - **Bus**: typed publish/subscribe between views and the storefront
//! - **Dialogs**: five modal dialogs and a manager keeping one open at a time
//! - **Views**: catalog grid, cart icon, preview, cart, checkout forms, confirmation
//! - **Storefront**: owns all of the above plus the cart and checkout flow
//!
//! # Example
//!
//! ```rust
//! use larek_commerce::Product;
//! use larek_data::ProductList;
//! use larek_ui::prelude::*;
//!
//! let mut store = Storefront::new("https://cdn.example");
//! store
//!     .catalog_loaded(Ok(ProductList {
//!         total: 1,
//!         items: vec![Product::new("p1", "HEX-леденец", 1450)],
//!     }))
//!     .unwrap();
//!
//! store.click_card(0).unwrap();
//! store.add_to_cart().unwrap();
//!
//! assert_eq!(store.cart_icon().counter(), 1);
//! assert_eq!(store.active_dialog(), None);
//! ```

pub mod bus;
pub mod dialog;
pub mod error;
pub mod events;
pub mod storefront;
pub mod views;

pub use bus::{EventBus, EventDef};
pub use dialog::{Dialog, DialogContent, DialogHost, DialogId, DialogManager};
pub use error::UiError;
pub use storefront::{Dialogs, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dialog::{DialogId, DialogManager};
    pub use crate::error::UiError;
    pub use crate::storefront::{Dialogs, Storefront};
    pub use crate::views::{Button, CatalogState};
}
