//! Non-interactive catalog listing.

use anyhow::{Context as _, Result};
use larek_commerce::Product;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::price_badge;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;

    let spinner = ctx.output.spinner("Loading catalog...");
    let result = api.fetch_products().await;
    spinner.finish_and_clear();
    let mut list = result.context("Failed to load catalog")?;

    if let Some(ref category) = args.category {
        list.items.retain(|p| matches_category(p, category));
    }

    if ctx.output.is_json() {
        ctx.output.json(&list);
        return Ok(());
    }

    ctx.output.header(&format!("Catalog ({} products)", list.items.len()));
    let width = list
        .items
        .iter()
        .map(|p| p.title.chars().count())
        .max()
        .unwrap_or(0);

    for product in &list.items {
        let price = price_badge(&product.price_label(), product.is_priceless());
        ctx.output.table_row(
            &[product.title.as_str(), product.category.as_str(), price.as_str()],
            &[width, 12, 0],
        );
    }

    Ok(())
}

fn matches_category(product: &Product, filter: &str) -> bool {
    product
        .category
        .to_lowercase()
        .contains(&filter.to_lowercase())
}
