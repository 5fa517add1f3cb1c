//! Inventory Reporting
//!
//! Pure computations over already-fetched products and categories. Every
//! function here is total: empty inputs give zero-valued results and no
//! function returns an error.
//!
//! ## Components
//!
//! - **aggregate**: Per-category summaries, stock distribution, orphans
//! - **rank**: Top-N products by stock value
//! - **stock**: The low-stock predicate and status badge
//! - **summary**: Dashboard counters and reconciliation with the backend
//! - **money**: Decimal stock values, rounding and currency formatting
//! - **chart**: Text bar charts
//! - **export**: CSV writers

pub mod aggregate;
pub mod chart;
pub mod export;
pub mod money;
pub mod rank;
pub mod stock;
pub mod summary;

pub use aggregate::{aggregate_by_category, orphaned_products, stock_distribution, CategorySummary};
pub use chart::bar_chart;
pub use export::{
    write_category_summaries_csv, write_distribution_csv, write_products_csv, ExportError,
};
pub use money::{format_currency, format_plain, round_money, stock_value};
pub use rank::top_by_value;
pub use stock::{filter_products, is_low_stock, low_stock_products, StockStatus};
pub use summary::{reconcile, summarize, Discrepancy, Reconciliation};

use crate::inventory::{Category, DashboardStats, Product, StockDistribution};
use serde::Serialize;

/// Everything the reports screen shows, computed in one pass over the data
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub summary: DashboardStats,
    pub categories: Vec<CategorySummary>,
    pub distribution: Vec<StockDistribution>,
    pub top_products: Vec<Product>,
    pub low_stock: Vec<Product>,
    pub orphaned: Vec<Product>,
}

impl InventoryReport {
    pub fn build(products: &[Product], categories: &[Category], top_n: usize) -> Self {
        Self {
            summary: summarize(products, categories),
            categories: aggregate_by_category(products, categories),
            distribution: stock_distribution(products),
            top_products: top_by_value(products, top_n),
            low_stock: low_stock_products(products),
            orphaned: orphaned_products(products, categories),
        }
    }
}
