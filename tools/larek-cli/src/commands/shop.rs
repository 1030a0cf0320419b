//! Interactive storefront.
//!
//! Draws whichever screen the storefront is on, asks for one action, feeds
//! it back, and repeats. Network work (catalog load, order submission)
//! happens between screens whenever the storefront asks for it.

use anyhow::{bail, Context as _, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};
use larek_commerce::PaymentMethod;
use larek_data::LarekApi;
use larek_ui::prelude::*;
use tracing::{debug, info, warn};

use super::ShopArgs;
use crate::context::Context;
use crate::output::price_badge;

/// One thing the user can do on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    OpenCard(usize),
    OpenCart,
    RetryCatalog,
    Quit,
    AddToCart,
    RemoveRow(usize),
    Checkout,
    EditAddress,
    ChoosePayment,
    SubmitAddressPayment,
    EditEmail,
    EditPhone,
    SubmitContact,
    ContinueShopping,
    Close,
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The storefront is interactive; use `larek catalog --json` for machine output");
    }

    let api = ctx.api()?;
    let mut store = Storefront::new(&ctx.config.api.cdn_url);

    loop {
        if store.catalog_requested() {
            load_catalog(&api, &mut store, ctx).await?;
        }
        if store.pending_order().is_some() {
            send_order(&api, &mut store, ctx).await?;
        }

        let action = match store.active_dialog() {
            None => page(&store)?,
            Some(DialogId::Preview) => preview(&store)?,
            Some(DialogId::Cart) => cart(&store)?,
            Some(DialogId::AddressPayment) => address_payment(&store)?,
            Some(DialogId::Contact) => contact(&store)?,
            Some(DialogId::Confirmation) => confirmation(&store)?,
        };

        if !apply(&mut store, action, &args)? {
            break;
        }
    }

    Ok(())
}

async fn load_catalog(api: &LarekApi, store: &mut Storefront, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading catalog...");
    let result = api.fetch_products().await;
    spinner.finish_and_clear();

    match &result {
        Ok(list) => info!(products = list.items.len(), "catalog loaded"),
        Err(error) => warn!(error = %error, "catalog load failed"),
    }
    store.catalog_loaded(result)?;
    Ok(())
}

async fn send_order(api: &LarekApi, store: &mut Storefront, ctx: &Context) -> Result<()> {
    let Some(order) = store.pending_order().cloned() else {
        return Ok(());
    };

    info!(items = order.items().len(), total = order.total(), "sending order");
    let spinner = ctx.output.spinner("Sending order...");
    let result = api.submit_order(&order).await;
    spinner.finish_and_clear();

    match &result {
        Ok(receipt) => {
            info!(order = %receipt.order_id, total = receipt.total, "order accepted");
            ctx.output
                .success(&format!("Order {} accepted", receipt.order_id));
        }
        Err(error) => warn!(error = %error, "order rejected"),
    }
    store.order_submitted(result)?;
    Ok(())
}

/// Carry out `action`. Returns `false` when the user leaves the shop.
fn apply(store: &mut Storefront, action: Action, args: &ShopArgs) -> Result<bool> {
    debug!(?action, screen = ?store.active_dialog(), "shop action");
    match action {
        Action::OpenCard(index) => store.click_card(index)?,
        Action::OpenCart => store.click_cart_icon()?,
        Action::RetryCatalog => store.retry_catalog()?,
        Action::Quit => return confirm_quit(store, args),
        Action::AddToCart => store.add_to_cart()?,
        Action::RemoveRow(index) => store.remove_cart_row(index)?,
        Action::Checkout => store.checkout()?,
        Action::EditAddress => {
            let current = store.dialogs().address_payment.address().to_string();
            let text = prompt_text("Адрес доставки", &current)?;
            store.input_address(&text)?;
        }
        Action::ChoosePayment => {
            let method = choose_payment(store.dialogs().address_payment.payment())?;
            store.select_payment(method)?;
        }
        Action::SubmitAddressPayment => store.submit_address_payment()?,
        Action::EditEmail => {
            let current = store.dialogs().contact.email().to_string();
            let text = prompt_text("Email", &current)?;
            store.input_email(&text)?;
        }
        Action::EditPhone => {
            let current = store.dialogs().contact.phone().to_string();
            let text = prompt_text("Телефон", &current)?;
            store.input_phone(&text)?;
        }
        Action::SubmitContact => store.submit_contact()?,
        Action::ContinueShopping => store.close_confirmation()?,
        Action::Close => store.close_dialog()?,
    }
    Ok(true)
}

fn confirm_quit(store: &Storefront, args: &ShopArgs) -> Result<bool> {
    if args.yes || store.cart().is_empty() {
        return Ok(false);
    }

    let leave = Confirm::new()
        .with_prompt(format!(
            "{} item(s) in the cart will be lost. Quit?",
            store.cart().len()
        ))
        .default(false)
        .interact()?;
    Ok(!leave)
}

// Screens

fn page(store: &Storefront) -> Result<Action> {
    let counter = store.cart_icon().counter();
    println!();
    println!(
        "{}  {}",
        style("WEB-ларёк").bold(),
        style(format!("[корзина: {}]", counter)).cyan()
    );

    let mut choices = Vec::new();
    match store.catalog().state() {
        CatalogState::Failed { message } => {
            eprintln!("{} {}", style("✗").red(), style(message).red());
            choices.push(("Повторить загрузку".to_string(), Action::RetryCatalog));
        }
        CatalogState::Loading => println!("{}", style("Загрузка...").dim()),
        CatalogState::Ready => {}
    }

    for (index, card) in store.catalog().cards().iter().enumerate() {
        let price = price_badge(&card.price_label, card.product().is_priceless());
        choices.push((
            format!("{} {} · {}", style(&card.category).dim(), card.title, price),
            Action::OpenCard(index),
        ));
    }
    choices.push((format!("Корзина ({})", counter), Action::OpenCart));
    choices.push(("Выход".to_string(), Action::Quit));

    choose("Каталог", choices)
}

fn preview(store: &Storefront) -> Result<Action> {
    let dialog = &store.dialogs().preview;
    let product = dialog
        .product()
        .context("preview dialog is open without a product")?;

    println!();
    println!("{}", style(&product.title).bold().underlined());
    println!("  {}", style(&product.category).dim());
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
    println!("  {}", style(dialog.image_url()).dim());
    println!(
        "  {}",
        price_badge(&product.price_label(), product.is_priceless())
    );

    let mut choices = Vec::new();
    let button = dialog.button();
    if button.enabled {
        choices.push((button.label.to_string(), Action::AddToCart));
    } else {
        println!("  {}", style(format!("[{}]", button.label)).dim());
    }
    choices.push(("Закрыть".to_string(), Action::Close));

    choose("Товар", choices)
}

fn cart(store: &Storefront) -> Result<Action> {
    let dialog = &store.dialogs().cart;

    println!();
    println!("{}", style("Корзина").bold().underlined());
    if dialog.rows().is_empty() {
        println!("  {}", style("Корзина пуста").dim());
    }
    for row in dialog.rows() {
        println!("  {}. {} — {}", row.index, row.title, row.price_label);
    }
    if !dialog.total_label().is_empty() {
        println!("  {} {}", style("Итого:").bold(), dialog.total_label());
    }

    let mut choices: Vec<_> = dialog
        .rows()
        .iter()
        .map(|row| {
            (
                format!("Удалить: {}", row.title),
                Action::RemoveRow(row.index - 1),
            )
        })
        .collect();
    let button = dialog.checkout_button();
    if button.enabled {
        choices.push((button.label.to_string(), Action::Checkout));
    }
    choices.push(("Закрыть".to_string(), Action::Close));

    choose("Корзина", choices)
}

fn address_payment(store: &Storefront) -> Result<Action> {
    let dialog = &store.dialogs().address_payment;

    println!();
    println!("{}", style("Оформление: адрес и оплата").bold().underlined());

    let mut choices = vec![
        (
            format!("Адрес: {}", or_dash(dialog.address())),
            Action::EditAddress,
        ),
        (
            format!(
                "Способ оплаты: {}",
                dialog.payment().map_or("—", |m| m.display_name())
            ),
            Action::ChoosePayment,
        ),
    ];
    let button = dialog.next_button();
    if button.enabled {
        choices.push((button.label.to_string(), Action::SubmitAddressPayment));
    }
    choices.push(("Закрыть".to_string(), Action::Close));

    choose("Шаг 1 из 2", choices)
}

fn contact(store: &Storefront) -> Result<Action> {
    let dialog = &store.dialogs().contact;

    println!();
    println!("{}", style("Оформление: контакты").bold().underlined());
    if let Some(error) = dialog.error() {
        println!("  {}", style(error).red());
    }

    let mut choices = vec![
        (
            format!("Email: {}", or_dash(dialog.email())),
            Action::EditEmail,
        ),
        (
            format!("Телефон: {}", or_dash(dialog.phone())),
            Action::EditPhone,
        ),
    ];
    let button = dialog.next_button();
    if button.enabled {
        choices.push((button.label.to_string(), Action::SubmitContact));
    }
    choices.push(("Закрыть".to_string(), Action::Close));

    choose("Шаг 2 из 2", choices)
}

fn confirmation(store: &Storefront) -> Result<Action> {
    let dialog = &store.dialogs().confirmation;

    println!();
    println!("{} {}", style("✓").green(), style(dialog.title()).bold());
    println!("  {}", dialog.description());

    let choices = vec![
        (dialog.close_button().label.to_string(), Action::ContinueShopping),
        ("Закрыть".to_string(), Action::Close),
    ];
    choose("Готово", choices)
}

// Prompts

fn choose(prompt: &str, mut choices: Vec<(String, Action)>) -> Result<Action> {
    let index = {
        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
        Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?
    };
    Ok(choices.swap_remove(index).1)
}

fn choose_payment(current: Option<PaymentMethod>) -> Result<PaymentMethod> {
    let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.display_name()).collect();
    let default = current
        .and_then(|c| PaymentMethod::ALL.iter().position(|m| *m == c))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("Способ оплаты")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(PaymentMethod::ALL[index])
}

fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let text = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}
