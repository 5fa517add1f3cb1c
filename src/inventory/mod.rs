//! Inventory Records
//!
//! Typed records and request payloads of the inventory API.
//!
//! ## Components
//!
//! - **Types**: Products, categories, dashboard counters and accounts
//! - **Requests**: Create/update payloads with local validation

mod requests;
mod serde_helpers;
mod types;

pub use requests::{
    describe_validation_errors, CategoryCreate, ProductCreate, ProductFilter, ProductUpdate,
    UserCreate, UserLogin, DEFAULT_REORDER_LEVEL,
};
pub use types::{
    Category, DashboardStats, MessageResponse, Product, StockDistribution, Token, User,
};
