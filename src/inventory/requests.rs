//! Request payloads submitted to the inventory API
//!
//! Payloads are validated locally before they are sent so that obviously
//! bad input never costs a round trip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Default reorder threshold applied by the API when none is given
pub const DEFAULT_REORDER_LEVEL: i64 = 10;

fn default_reorder_level() -> i64 {
    DEFAULT_REORDER_LEVEL
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Unit price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Body of `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i64,

    #[validate(custom(function = "non_negative_price"))]
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    #[validate(range(min = 0, message = "Reorder level must not be negative"))]
    #[serde(default = "default_reorder_level")]
    pub reorder_level: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /products/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "SKU must not be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[validate(length(min = 1, message = "Category must not be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[validate(custom(function = "non_negative_price"))]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub unit_price: Option<Decimal>,

    #[validate(range(min = 0, message = "Reorder level must not be negative"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductUpdate {
    /// True when no field would be changed
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.unit_price.is_none()
            && self.reorder_level.is_none()
            && self.description.is_none()
    }
}

/// Body of `POST /categories`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserLogin {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Query parameters of `GET /products`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock: Option<bool>,
}

impl ProductFilter {
    /// Builder method: only products in this category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder method: only products at or below their reorder level
    pub fn low_stock(mut self) -> Self {
        self.low_stock = Some(true);
        self
    }
}

/// Flatten validator errors into one readable line
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
