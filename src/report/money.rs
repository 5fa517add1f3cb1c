//! Money arithmetic and formatting
//!
//! Stock values are computed with `Decimal` so that summing thousands of
//! `quantity * unit_price` products never drifts the way binary floats do.

use crate::inventory::Product;
use rust_decimal::prelude::*;

/// Rounding strategy for displayed money (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Value of the stock held for one product
///
/// Saturates at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
#[inline]
pub fn stock_value(product: &Product) -> Decimal {
    Decimal::from(product.quantity).saturating_mul(product.unit_price)
}

/// Round to cents, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a money amount as `<symbol>1,234.50`
///
/// Negative amounts get a leading minus before the symbol.
pub fn format_currency(value: Decimal, symbol: &str) -> String {
    let rounded = round_money(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    // Always render two decimals even when the value has fewer
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        group_thousands(whole),
        cents
    )
}

/// Plain two-decimal rendering used by CSV and JSON exports
pub fn format_plain(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
