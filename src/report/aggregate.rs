//! Per-category aggregation
//!
//! Products reference their category by name. Two groupings are offered:
//! - `aggregate_by_category`: one summary per known category, in the order
//!   the categories were given; unknown names are left out
//! - `stock_distribution`: one entry per category name that appears on a
//!   product, in first-seen order, orphans included

use crate::inventory::{Category, Product, StockDistribution};
use crate::report::money::stock_value;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Summary statistics for one category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySummary {
    pub name: String,
    pub product_count: u64,
    pub total_quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}

impl CategorySummary {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            product_count: 0,
            total_quantity: 0,
            total_value: Decimal::ZERO,
        }
    }

    fn add(&mut self, product: &Product) {
        self.product_count += 1;
        self.total_quantity = self.total_quantity.saturating_add(product.quantity);
        self.total_value = self.total_value.saturating_add(stock_value(product));
    }
}

/// Summarize products per category
///
/// Emits exactly one summary per input category, preserving order; a
/// category without products gets all-zero counters.
pub fn aggregate_by_category(products: &[Product], categories: &[Category]) -> Vec<CategorySummary> {
    let mut totals: HashMap<&str, CategorySummary> = categories
        .iter()
        .map(|c| (c.name.as_str(), CategorySummary::empty(&c.name)))
        .collect();

    for product in products {
        if let Some(summary) = totals.get_mut(product.category.as_str()) {
            summary.add(product);
        }
    }

    categories
        .iter()
        .map(|c| {
            totals
                .get(c.name.as_str())
                .cloned()
                .unwrap_or_else(|| CategorySummary::empty(&c.name))
        })
        .collect()
}

/// Group products by their category name in first-seen order
///
/// Unlike `aggregate_by_category` this needs no category list, so products
/// whose category is unknown (or empty) still get an entry.
pub fn stock_distribution(products: &[Product]) -> Vec<StockDistribution> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut distribution: Vec<StockDistribution> = Vec::new();

    for product in products {
        let slot = *index.entry(product.category.as_str()).or_insert_with(|| {
            distribution.push(StockDistribution {
                category: product.category.clone(),
                count: 0,
                total_value: Decimal::ZERO,
            });
            distribution.len() - 1
        });

        let entry = &mut distribution[slot];
        entry.count += 1;
        entry.total_value = entry.total_value.saturating_add(stock_value(product));
    }

    distribution
}

/// Products whose category name matches none of the given categories
pub fn orphaned_products(products: &[Product], categories: &[Category]) -> Vec<Product> {
    let known: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    products
        .iter()
        .filter(|p| !known.contains(p.category.as_str()))
        .cloned()
        .collect()
}
