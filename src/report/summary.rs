//! Global summary counters
//!
//! The dashboard counters are derived from the same product and category
//! lists shown elsewhere on screen. A summary reported by the backend is
//! only compared against the derived one, never displayed in its place.

use crate::inventory::{Category, DashboardStats, Product};
use crate::report::money::{format_plain, round_money, stock_value};
use crate::report::stock::is_low_stock;
use serde::Serialize;

/// Derive the dashboard counters from raw records
pub fn summarize(products: &[Product], categories: &[Category]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_products: products.len() as u64,
        total_categories: categories.len() as u64,
        ..DashboardStats::default()
    };

    for product in products {
        stats.total_stock_value = stats.total_stock_value.saturating_add(stock_value(product));
        stats.total_quantity = stats.total_quantity.saturating_add(product.quantity);
        if is_low_stock(product) {
            stats.low_stock_count += 1;
        }
    }

    stats
}

/// One counter where the backend and the derived summary disagree
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Discrepancy {
    pub field: &'static str,
    pub reported: String,
    pub derived: String,
}

/// Outcome of comparing a reported summary with the derived one
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    /// The counters to display
    pub stats: DashboardStats,
    pub discrepancies: Vec<Discrepancy>,
}

impl Reconciliation {
    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Compare the backend's summary against the derived one
///
/// Money is compared after rounding to cents since the backend sums floats.
pub fn reconcile(derived: DashboardStats, reported: &DashboardStats) -> Reconciliation {
    let mut discrepancies = Vec::new();

    let mut check = |field: &'static str, reported: String, derived: String| {
        if reported != derived {
            discrepancies.push(Discrepancy {
                field,
                reported,
                derived,
            });
        }
    };

    check(
        "total_products",
        reported.total_products.to_string(),
        derived.total_products.to_string(),
    );
    check(
        "total_categories",
        reported.total_categories.to_string(),
        derived.total_categories.to_string(),
    );
    check(
        "total_stock_value",
        format_plain(round_money(reported.total_stock_value)),
        format_plain(round_money(derived.total_stock_value)),
    );
    check(
        "total_quantity",
        reported.total_quantity.to_string(),
        derived.total_quantity.to_string(),
    );
    check(
        "low_stock_count",
        reported.low_stock_count.to_string(),
        derived.low_stock_count.to_string(),
    );

    Reconciliation {
        stats: derived,
        discrepancies,
    }
}
