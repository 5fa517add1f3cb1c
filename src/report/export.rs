//! CSV export of listings and report tables
//!
//! Money columns are written as plain two-decimal numbers so spreadsheets
//! parse them without a currency symbol.

use crate::inventory::{Product, StockDistribution};
use crate::report::aggregate::CategorySummary;
use crate::report::money::{format_plain, stock_value};
use crate::report::stock::StockStatus;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur while writing an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write one row per product, with its stock value and status
pub fn write_products_csv<W: Write>(products: &[Product], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "id",
        "name",
        "sku",
        "category",
        "quantity",
        "unit_price",
        "reorder_level",
        "stock_value",
        "status",
    ])?;

    for p in products {
        csv.write_record([
            p.id.clone(),
            p.name.clone(),
            p.sku.clone(),
            p.category.clone(),
            p.quantity.to_string(),
            format_plain(p.unit_price),
            p.reorder_level.to_string(),
            format_plain(stock_value(p)),
            StockStatus::of(p).to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the per-category summary table
pub fn write_category_summaries_csv<W: Write>(
    summaries: &[CategorySummary],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["category", "product_count", "total_quantity", "total_value"])?;

    for s in summaries {
        csv.write_record([
            s.name.clone(),
            s.product_count.to_string(),
            s.total_quantity.to_string(),
            format_plain(s.total_value),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the stock distribution table
pub fn write_distribution_csv<W: Write>(
    distribution: &[StockDistribution],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["category", "count", "total_value"])?;

    for d in distribution {
        csv.write_record([
            d.category.clone(),
            d.count.to_string(),
            format_plain(d.total_value),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_products_csv() {
        let products = vec![
            Product::new("p1", "Pens, blue", "Stationery", 5, Decimal::new(599, 2))
                .sku("STAT-002")
                .reorder_level(50),
        ];

        let mut out = Vec::new();
        write_products_csv(&products, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "id,name,sku,category,quantity,unit_price,reorder_level,stock_value,status"
        );
        assert_eq!(
            lines[1],
            "p1,\"Pens, blue\",STAT-002,Stationery,5,5.99,50,29.95,Low Stock"
        );
    }

    #[test]
    fn test_category_summaries_csv() {
        let summaries = vec![CategorySummary {
            name: "A".to_string(),
            product_count: 2,
            total_quantity: 3,
            total_value: Decimal::from(25),
        }];

        let mut out = Vec::new();
        write_category_summaries_csv(&summaries, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "category,product_count,total_quantity,total_value\nA,2,3,25.00\n"
        );
    }

    #[test]
    fn test_distribution_csv_header_only_when_empty() {
        let mut out = Vec::new();
        write_distribution_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "category,count,total_value\n");
    }
}
