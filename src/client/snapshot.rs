//! Dashboard snapshot
//!
//! Fetches the three independent inputs of the dashboard concurrently and
//! derives every counter from them.

use crate::client::error::ClientResult;
use crate::client::http::InventoryApi;
use crate::client::session::Session;
use crate::inventory::{Category, DashboardStats, Product, ProductFilter};
use crate::report::{reconcile, summarize, InventoryReport, Reconciliation};

/// Products, categories and the backend's own summary, fetched together
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Summary as computed by the backend, kept only as a cross-check
    pub reported: DashboardStats,
}

impl InventorySnapshot {
    /// Run the three reads concurrently; the first failure wins
    pub async fn load<A: InventoryApi + ?Sized>(api: &A, session: &Session) -> ClientResult<Self> {
        let filter = ProductFilter::default();
        let (products, categories, reported) = tokio::try_join!(
            api.products(session, &filter),
            api.categories(session),
            api.dashboard_stats(session),
        )?;

        tracing::debug!(
            products = products.len(),
            categories = categories.len(),
            "Loaded inventory snapshot"
        );

        Ok(Self {
            products,
            categories,
            reported,
        })
    }

    /// Derived counters, compared against the backend's
    ///
    /// Each disagreement is logged; the derived values are returned either way.
    pub fn reconcile(&self) -> Reconciliation {
        let derived = summarize(&self.products, &self.categories);
        let result = reconcile(derived, &self.reported);

        for d in &result.discrepancies {
            tracing::warn!(
                field = d.field,
                reported = %d.reported,
                derived = %d.derived,
                "Backend summary disagrees with fetched records"
            );
        }

        result
    }

    /// Counters to display on the dashboard
    pub fn stats(&self) -> DashboardStats {
        self.reconcile().stats
    }

    pub fn report(&self, top_n: usize) -> InventoryReport {
        InventoryReport::build(&self.products, &self.categories, top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::ClientError;
    use crate::inventory::User;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeApi {
        products: Vec<Product>,
        categories: Vec<Category>,
        reported: DashboardStats,
        fail_categories: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl InventoryApi for FakeApi {
        async fn products(&self, _: &Session, _: &ProductFilter) -> ClientResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.products.clone())
        }

        async fn categories(&self, _: &Session) -> ClientResult<Vec<Category>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_categories {
                return Err(ClientError::Unauthorized("Token has expired".to_string()));
            }
            Ok(self.categories.clone())
        }

        async fn dashboard_stats(&self, _: &Session) -> ClientResult<DashboardStats> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reported.clone())
        }
    }

    fn session() -> Session {
        Session {
            access_token: "t".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                id: "u".to_string(),
                email: "u@example.com".to_string(),
                name: "U".to_string(),
                created_at: None,
            },
            issued_at: Utc::now(),
        }
    }

    fn fake(reported: DashboardStats, fail_categories: bool) -> FakeApi {
        FakeApi {
            products: vec![
                Product::new("p1", "Desk", "Furniture", 2, Decimal::from(10)).reorder_level(5),
                Product::new("p2", "Cable", "Electronics", 30, Decimal::ONE).reorder_level(5),
            ],
            categories: vec![
                Category::new("c1", "Furniture"),
                Category::new("c2", "Electronics"),
            ],
            reported,
            fail_categories,
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_load_and_derive() {
        let stale = DashboardStats {
            total_products: 1,
            ..DashboardStats::default()
        };
        let api = fake(stale, false);

        let snapshot = InventorySnapshot::load(&api, &session()).await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);

        let stats = snapshot.stats();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.total_stock_value, Decimal::from(50));
        assert_eq!(stats.low_stock_count, 1);

        let reconciliation = snapshot.reconcile();
        assert!(!reconciliation.is_consistent());
        assert!(reconciliation
            .discrepancies
            .iter()
            .any(|d| d.field == "total_products"));
    }

    #[tokio::test]
    async fn test_load_propagates_failure() {
        let api = fake(DashboardStats::default(), true);
        let err = InventorySnapshot::load(&api, &session()).await.unwrap_err();
        assert!(err.requires_login());
    }

    #[tokio::test]
    async fn test_report_from_snapshot() {
        let api = fake(DashboardStats::default(), false);
        let snapshot = InventorySnapshot::load(&api, &session()).await.unwrap();

        let report = snapshot.report(1);
        assert_eq!(report.top_products.len(), 1);
        assert_eq!(report.top_products[0].id, "p2");
        assert_eq!(report.categories[0].name, "Furniture");
    }
}
