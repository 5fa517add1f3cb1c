//! Core record types exchanged with the inventory API
//!
//! This module defines the records the front-end fetches and renders:
//! - `Product`: one inventory line item
//! - `Category`: a grouping label, joined to products by name
//! - `DashboardStats`: the global counters shown on the dashboard
//! - `StockDistribution`: per-category count and value, as the backend groups it
//! - `User` and `Token`: the authenticated account and the login response

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// One inventory line item
///
/// Numeric fields default to zero when the API omits them or sends null or
/// a malformed value, so a partially populated record still takes part in
/// every aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Opaque identifier assigned by the backing store
    #[serde(default, deserialize_with = "serde_helpers::string")]
    pub id: String,
    /// Display name
    #[serde(default, deserialize_with = "serde_helpers::string")]
    pub name: String,
    /// Stock-keeping code (unique per product)
    #[serde(default, deserialize_with = "serde_helpers::string")]
    pub sku: String,
    /// Name of the category this product belongs to
    #[serde(default, deserialize_with = "serde_helpers::string")]
    pub category: String,
    /// Units currently in stock
    #[serde(default, deserialize_with = "serde_helpers::int")]
    pub quantity: i64,
    /// Price per unit
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "serde_helpers::decimal"
    )]
    pub unit_price: Decimal,
    /// Stock at or below this level is flagged as low
    #[serde(default, deserialize_with = "serde_helpers::int")]
    pub reorder_level: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with no description or timestamps
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: String::new(),
            category: category.into(),
            quantity,
            unit_price,
            reorder_level: 0,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder method: set the SKU
    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Builder method: set the reorder level
    pub fn reorder_level(mut self, level: i64) -> Self {
        self.reorder_level = level;
        self
    }

    /// Builder method: set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A grouping label for products
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(default, deserialize_with = "serde_helpers::string")]
    pub id: String,
    /// Unique display name, also the join key against `Product::category`
    #[serde(default, deserialize_with = "serde_helpers::string")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            created_at: None,
        }
    }

    /// Builder method: set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Global counters shown on the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "serde_helpers::count")]
    pub total_products: u64,
    #[serde(default, deserialize_with = "serde_helpers::count")]
    pub total_categories: u64,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "serde_helpers::decimal"
    )]
    pub total_stock_value: Decimal,
    #[serde(default, deserialize_with = "serde_helpers::int")]
    pub total_quantity: i64,
    #[serde(default, deserialize_with = "serde_helpers::count")]
    pub low_stock_count: u64,
}

/// Product count and stock value for one category name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockDistribution {
    #[serde(default, deserialize_with = "serde_helpers::string")]
    pub category: String,
    #[serde(default, deserialize_with = "serde_helpers::count")]
    pub count: u64,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "serde_helpers::decimal"
    )]
    pub total_value: Decimal,
}

/// An authenticated account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of the register and login endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Plain `{"message": ...}` acknowledgement returned by delete and seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
