//! Price labels.
//!
//! Prices are whole numbers of "synapses", the shop's fictional currency.
//! A price of zero means the product is priceless and cannot be bought.

/// Label shown instead of a number for priceless products.
pub const PRICELESS_LABEL: &str = "бесценно";

/// Russian plural form of the currency word for `amount`.
///
/// 1, 21, 101 take the singular; 2-4, 22-24 the paucal; everything else,
/// including the teens 11-14, the genitive plural.
pub fn synapse_word(amount: u64) -> &'static str {
    let mod10 = amount % 10;
    let mod100 = amount % 100;

    if (11..=14).contains(&mod100) {
        "синапсов"
    } else if mod10 == 1 {
        "синапс"
    } else if (2..=4).contains(&mod10) {
        "синапса"
    } else {
        "синапсов"
    }
}

/// Format a price for display, e.g. `"750 синапсов"` or `"бесценно"`.
pub fn price_label(price: u64) -> String {
    if price == 0 {
        return PRICELESS_LABEL.to_string();
    }
    format!("{} {}", price, synapse_word(price))
}

/// Text of the order confirmation, e.g. `"Списано 350 синапсов"`.
pub fn charged_label(total: u64) -> String {
    format!("Списано {}", price_label(total))
}

/// Sum prices, failing on overflow rather than wrapping.
pub fn try_sum(prices: impl IntoIterator<Item = u64>) -> Option<u64> {
    prices
        .into_iter()
        .try_fold(0u64, |acc, price| acc.checked_add(price))
}
