//! Low-stock classification
//!
//! `is_low_stock` is the one predicate behind the dashboard counter, the
//! status badge in product listings, and the low-stock filter.

use crate::inventory::{Product, ProductFilter};
use serde::Serialize;

/// True when the product is at or below its reorder level
#[inline]
pub fn is_low_stock(product: &Product) -> bool {
    product.quantity <= product.reorder_level
}

/// Status badge shown next to a product
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
}

impl StockStatus {
    pub fn of(product: &Product) -> Self {
        if is_low_stock(product) {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "In Stock"),
            StockStatus::LowStock => write!(f, "Low Stock"),
        }
    }
}

/// Products at or below their reorder level, in input order
pub fn low_stock_products(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| is_low_stock(p)).cloned().collect()
}

/// Apply the same filter the API applies to `GET /products`
///
/// Category matching is exact. `low_stock: Some(false)` does not filter,
/// matching the API which only narrows on a true flag.
pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| match filter.category.as_deref() {
            Some(category) if !category.is_empty() => p.category == category,
            _ => true,
        })
        .filter(|p| filter.low_stock != Some(true) || is_low_stock(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, category: &str, quantity: i64, reorder: i64) -> Product {
        Product::new(id, id, category, quantity, Decimal::ONE).reorder_level(reorder)
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(is_low_stock(&product("a", "X", 5, 5)));
        assert!(!is_low_stock(&product("b", "X", 6, 5)));
        assert!(is_low_stock(&product("c", "X", 0, 0)));
    }

    #[test]
    fn test_stock_status_badge() {
        assert_eq!(StockStatus::of(&product("a", "X", 3, 10)), StockStatus::LowStock);
        assert_eq!(StockStatus::of(&product("b", "X", 30, 10)), StockStatus::InStock);
        assert_eq!(StockStatus::LowStock.to_string(), "Low Stock");
    }

    #[test]
    fn test_low_stock_products_keeps_order() {
        let products = vec![
            product("a", "X", 1, 5),
            product("b", "X", 10, 5),
            product("c", "Y", 5, 5),
        ];
        let low: Vec<String> = low_stock_products(&products)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(low, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_products() {
        let products = vec![
            product("a", "Electronics", 1, 5),
            product("b", "Electronics", 10, 5),
            product("c", "Furniture", 2, 5),
        ];

        let by_category = filter_products(&products, &ProductFilter::default().category("Electronics"));
        assert_eq!(by_category.len(), 2);

        let low = filter_products(
            &products,
            &ProductFilter::default().category("Electronics").low_stock(),
        );
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, "a");

        let all = filter_products(&products, &ProductFilter::default());
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let products = vec![product("a", "Electronics", 1, 5)];
        let none = filter_products(&products, &ProductFilter::default().category("electronics"));
        assert!(none.is_empty());
    }
}
