//! # Stacko
//!
//! Inventory management client - a thin front-end over a remote inventory
//! API with dashboard counters, product and category management, and
//! stock reports.
//!
//! ## Features
//!
//! - **Typed API client**: Auth, products, categories and dashboard endpoints
//! - **Explicit sessions**: Login state is a value, stored between commands
//! - **Reporting**: Per-category summaries, top products by value, low stock
//! - **Consistency checks**: Dashboard counters derived from the same records
//!   shown on screen, cross-checked against the backend's summary
//!
//! ## Modules
//!
//! - [`inventory`]: Records and request payloads
//! - [`report`]: Pure aggregation, ranking, formatting and export
//! - [`client`]: REST client, session and dashboard snapshot
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stacko::client::{ApiClient, InventorySnapshot};
//! use stacko::config::Config;
//! use stacko::inventory::UserLogin;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let client = ApiClient::new(&config.api, &config.session)?;
//!
//!     let session = client
//!         .login(&UserLogin {
//!             email: "admin@example.com".to_string(),
//!             password: "secret123".to_string(),
//!         })
//!         .await?;
//!
//!     let snapshot = InventorySnapshot::load(&client, &session).await?;
//!     let report = snapshot.report(5);
//!
//!     for summary in &report.categories {
//!         println!("{}: {} products", summary.name, summary.product_count);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod inventory;
pub mod logging;
pub mod report;

// Re-export top-level types for convenience
pub use inventory::{
    Category, CategoryCreate, DashboardStats, Product, ProductCreate, ProductFilter,
    ProductUpdate, StockDistribution, Token, User, UserCreate, UserLogin,
};

pub use report::{
    aggregate_by_category, is_low_stock, summarize, top_by_value, CategorySummary,
    InventoryReport, Reconciliation, StockStatus,
};

pub use client::{
    ApiClient, ClientError, ClientResult, InventoryApi, InventorySnapshot, Session, SessionError,
    SessionStore,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, ReportConfig, SessionConfig};
