//! Top-N ranking by stock value

use crate::inventory::Product;
use crate::report::money::stock_value;
use rust_decimal::Decimal;

/// The `n` products holding the most stock value, highest first
///
/// Equal values keep their input order, so the ranking is reproducible.
pub fn top_by_value(products: &[Product], n: usize) -> Vec<Product> {
    if n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(Decimal, &Product)> =
        products.iter().map(|p| (stock_value(p), p)).collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked
        .into_iter()
        .take(n)
        .map(|(_, p)| p.clone())
        .collect()
}
