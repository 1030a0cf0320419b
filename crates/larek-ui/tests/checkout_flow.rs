//! End-to-end checkout through the storefront's public surface.

use chrono::Utc;
use larek_commerce::{CheckoutStep, PaymentMethod, Product};
use larek_data::{FetchError, OrderReceipt, ProductList};
use larek_ui::prelude::*;

fn catalog() -> ProductList {
    ProductList {
        total: 4,
        items: vec![
            Product::new("854cef69", "+1 час в сутках", 750)
                .with_category("софт-скил")
                .with_image("/Shell.svg"),
            Product::new("c101ab44", "HEX-леденец", 1450).with_category("другое"),
            Product::new("b06cde61", "Мамка-таймер", 0).with_category("другое"),
            Product::new("412bcf81", "Фреймворк куки судьбы", 2500).with_category("хард-скил"),
        ],
    }
}

fn storefront() -> Storefront {
    let mut store = Storefront::new("https://larek-api.nomoreparties.co/content/weblarek");
    store.catalog_loaded(Ok(catalog())).unwrap();
    store
}

fn add(store: &mut Storefront, index: usize) {
    store.click_card(index).unwrap();
    store.add_to_cart().unwrap();
    assert!(store.visible_dialogs().len() <= 1);
}

fn receipt(total: u64) -> OrderReceipt {
    OrderReceipt {
        order_id: "28c57cb4-3002-4445-8aa1-2a06a5055ae5".into(),
        total,
        received_at: Utc::now(),
    }
}

/// Walk from the cart to a pending order.
fn fill_checkout(store: &mut Storefront) {
    store.click_cart_icon().unwrap();
    store.checkout().unwrap();
    assert_eq!(store.active_dialog(), Some(DialogId::AddressPayment));
    assert!(!store.dialogs().address_payment.next_button().enabled);

    store.input_address("  Санкт-Петербург, Невский пр., 1 ").unwrap();
    store.select_payment(PaymentMethod::OnDelivery).unwrap();
    store.submit_address_payment().unwrap();
    assert_eq!(store.active_dialog(), Some(DialogId::Contact));
    assert!(!store.dialogs().contact.next_button().enabled);

    store.input_email("buyer@example.com").unwrap();
    store.input_phone("+7 (999) 123-45-67").unwrap();
    store.submit_contact().unwrap();
}

#[test]
fn test_full_checkout_resets_cart_and_draft() {
    let mut store = storefront();
    add(&mut store, 0);
    add(&mut store, 1);
    assert_eq!(store.cart_icon().counter(), 2);

    fill_checkout(&mut store);

    let order = store.pending_order().expect("order should be pending");
    assert_eq!(order.total(), 2200);
    assert_eq!(order.address(), "Санкт-Петербург, Невский пр., 1");
    assert_eq!(order.payment(), PaymentMethod::OnDelivery);
    assert_eq!(order.items().len(), 2);
    assert!(store.dialogs().contact.is_submitting());

    store.order_submitted(Ok(receipt(2200))).unwrap();
    assert_eq!(store.active_dialog(), Some(DialogId::Confirmation));
    assert_eq!(store.checkout_step(), CheckoutStep::Confirmation);
    assert_eq!(
        store.dialogs().confirmation.description(),
        "Списано 2200 синапсов"
    );
    assert_eq!(store.last_receipt().map(|r| r.total), Some(2200));

    store.close_confirmation().unwrap();
    assert_eq!(store.active_dialog(), None);
    assert!(store.cart().is_empty());
    assert_eq!(store.cart_icon().counter(), 0);
    assert_eq!(store.checkout_step(), CheckoutStep::Cart);
    assert!(store.draft().is_empty());
    assert!(store.pending_order().is_none());
}

#[test]
fn test_closing_confirmation_via_close_control_also_resets() {
    let mut store = storefront();
    add(&mut store, 3);
    fill_checkout(&mut store);
    store.order_submitted(Ok(receipt(2500))).unwrap();

    store.close_dialog().unwrap();

    assert!(store.cart().is_empty());
    assert_eq!(store.checkout_step(), CheckoutStep::Cart);
}

#[test]
fn test_failed_submission_can_be_retried() {
    let mut store = storefront();
    add(&mut store, 0);
    fill_checkout(&mut store);

    store
        .order_submitted(Err(FetchError::Rejected("Неверный адрес".into())))
        .unwrap();

    assert_eq!(store.active_dialog(), Some(DialogId::Contact));
    assert_eq!(store.checkout_step(), CheckoutStep::Contact);
    assert!(store.pending_order().is_none());
    assert!(store
        .dialogs()
        .contact
        .error()
        .is_some_and(|e| e.contains("Неверный адрес")));
    assert_eq!(store.cart().len(), 1);

    store.submit_contact().unwrap();
    assert!(store.pending_order().is_some());
    store.order_submitted(Ok(receipt(750))).unwrap();
    assert_eq!(store.active_dialog(), Some(DialogId::Confirmation));
}

#[test]
fn test_cart_total_matches_sum_of_prices() {
    let mut store = storefront();
    add(&mut store, 0);
    add(&mut store, 1);
    add(&mut store, 3);

    let sum: u64 = store.cart().items().iter().map(|p| p.price).sum();
    assert_eq!(store.cart().total().unwrap(), sum);

    store.click_cart_icon().unwrap();
    assert_eq!(store.dialogs().cart.total_label(), "4700 синапсов");
    assert_eq!(store.dialogs().cart.rows().len(), 3);
}

#[test]
fn test_priceless_product_stays_out_of_cart() {
    let mut store = storefront();
    store.click_card(2).unwrap();

    assert!(!store.dialogs().preview.button().enabled);
    assert!(store.add_to_cart().is_err());
    assert!(store.cart().is_empty());
}

#[test]
fn test_at_most_one_dialog_visible_throughout() {
    let mut store = storefront();
    add(&mut store, 0);

    store.click_card(1).unwrap();
    store.click_cart_icon().unwrap();
    assert_eq!(store.visible_dialogs(), vec![DialogId::Cart]);

    store.checkout().unwrap();
    assert_eq!(store.visible_dialogs(), vec![DialogId::AddressPayment]);

    store.close_dialog().unwrap();
    assert!(store.visible_dialogs().is_empty());

    // A fresh checkout starts with blank forms.
    store.click_cart_icon().unwrap();
    store.checkout().unwrap();
    assert_eq!(store.dialogs().address_payment.address(), "");
    assert_eq!(store.dialogs().address_payment.payment(), None);
}

#[test]
fn test_forms_gate_their_next_button() {
    let mut store = storefront();
    add(&mut store, 0);
    store.click_cart_icon().unwrap();
    store.checkout().unwrap();

    store.input_address("Москва").unwrap();
    assert!(store.submit_address_payment().is_err());
    assert_eq!(store.checkout_step(), CheckoutStep::AddressPayment);

    store.select_payment(PaymentMethod::Online).unwrap();
    store.input_address("   ").unwrap();
    assert!(matches!(
        store.submit_address_payment(),
        Err(UiError::InvalidUse(_))
    ));
}

#[test]
fn test_browsing_mid_checkout_restarts_it() {
    let mut store = storefront();
    add(&mut store, 0);
    store.click_cart_icon().unwrap();
    store.checkout().unwrap();
    store.input_address("Москва").unwrap();
    store.select_payment(PaymentMethod::Online).unwrap();
    store.submit_address_payment().unwrap();

    store.click_card(3).unwrap();
    assert_eq!(store.visible_dialogs(), vec![DialogId::Preview]);
    assert_eq!(store.checkout_step(), CheckoutStep::Cart);
    store.add_to_cart().unwrap();

    fill_checkout(&mut store);
    assert_eq!(store.pending_order().map(|o| o.total()), Some(3250));

    // The page is locked until the order comes back.
    assert!(store.click_card(1).is_err());
    assert!(store.close_dialog().is_err());
    assert_eq!(store.visible_dialogs(), vec![DialogId::Contact]);

    store.order_submitted(Ok(receipt(3250))).unwrap();
    store.close_dialog().unwrap();
    assert!(store.cart().is_empty());
}
