//! Money helpers
//!
//! All arithmetic happens on `i64` minor units and is re-wrapped afterwards, so
//! repeated add/update cycles never accumulate rounding drift.

use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};

/// Look up one of the supported currencies by its ISO alpha code.
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim() {
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}

/// Multiply a unit price by a quantity.
pub fn extend<'a>(unit_price: &Money<'a, Currency>, quantity: u32) -> Money<'a, Currency> {
    let minor = unit_price
        .to_minor_units()
        .saturating_mul(i64::from(quantity));

    Money::from_minor(minor, unit_price.currency())
}

/// Sum minor-unit amounts into a single value in `currency`.
pub fn sum_minor<'a>(
    amounts: impl IntoIterator<Item = i64>,
    currency: &'a Currency,
) -> Money<'a, Currency> {
    let minor = amounts.into_iter().fold(0_i64, i64::saturating_add);

    Money::from_minor(minor, currency)
}
