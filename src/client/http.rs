//! Inventory REST API Client
//!
//! HTTP client for the inventory API. Authenticated calls take the
//! [`Session`] explicitly; the client itself holds no login state.

use crate::client::error::{ClientError, ClientResult};
use crate::client::session::Session;
use crate::config::{ApiConfig, SessionConfig};
use crate::inventory::{
    describe_validation_errors, Category, CategoryCreate, DashboardStats, MessageResponse,
    Product, ProductCreate, ProductFilter, ProductUpdate, StockDistribution, Token, User,
    UserCreate, UserLogin,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Reads the dashboard and reports screens depend on
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn products(&self, session: &Session, filter: &ProductFilter) -> ClientResult<Vec<Product>>;

    async fn categories(&self, session: &Session) -> ClientResult<Vec<Category>>;

    async fn dashboard_stats(&self, session: &Session) -> ClientResult<DashboardStats>;
}

/// Inventory REST API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token_lifetime: Duration,
}

impl ApiClient {
    /// Create a client for the configured API
    pub fn new(config: &ApiConfig, session: &SessionConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let base_url = Url::parse(config.normalized_base_url())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            client,
            base_url,
            token_lifetime: session.token_lifetime()?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // ============ Auth ============

    /// Create an account and return its first session
    pub async fn register(&self, user: &UserCreate) -> ClientResult<Session> {
        validate(user)?;
        let token: Token = self
            .send(self.request(Method::POST, &["auth", "register"]).json(user))
            .await?;
        tracing::info!(user = %token.user.email, "Registered new account");
        Ok(Session::from_token(token, Utc::now()))
    }

    /// Exchange credentials for a session
    pub async fn login(&self, credentials: &UserLogin) -> ClientResult<Session> {
        validate(credentials)?;
        let token: Token = self
            .send(self.request(Method::POST, &["auth", "login"]).json(credentials))
            .await?;
        tracing::info!(user = %token.user.email, "Logged in");
        Ok(Session::from_token(token, Utc::now()))
    }

    /// The account the session belongs to, as the API sees it
    pub async fn me(&self, session: &Session) -> ClientResult<User> {
        let request = self.authed(session, Method::GET, &["auth", "me"])?;
        self.send(request).await
    }

    // ============ Categories ============

    pub async fn list_categories(&self, session: &Session) -> ClientResult<Vec<Category>> {
        let request = self.authed(session, Method::GET, &["categories"])?;
        self.send(request).await
    }

    pub async fn create_category(
        &self,
        session: &Session,
        category: &CategoryCreate,
    ) -> ClientResult<Category> {
        validate(category)?;
        let request = self
            .authed(session, Method::POST, &["categories"])?
            .json(category);
        self.send(request).await
    }

    // ============ Products ============

    /// List products, narrowed by category and/or low stock on the server
    pub async fn list_products(
        &self,
        session: &Session,
        filter: &ProductFilter,
    ) -> ClientResult<Vec<Product>> {
        let request = self
            .authed(session, Method::GET, &["products"])?
            .query(filter);
        self.send(request).await
    }

    pub async fn create_product(
        &self,
        session: &Session,
        product: &ProductCreate,
    ) -> ClientResult<Product> {
        validate(product)?;
        let request = self
            .authed(session, Method::POST, &["products"])?
            .json(product);
        self.send(request).await
    }

    /// Apply a partial update; only fields present in `update` change
    pub async fn update_product(
        &self,
        session: &Session,
        id: &str,
        update: &ProductUpdate,
    ) -> ClientResult<Product> {
        if update.is_empty() {
            return Err(ClientError::Validation("Nothing to update".to_string()));
        }
        validate(update)?;
        let request = self
            .authed(session, Method::PUT, &["products", id])?
            .json(update);
        self.send(request).await
    }

    pub async fn delete_product(&self, session: &Session, id: &str) -> ClientResult<String> {
        let request = self.authed(session, Method::DELETE, &["products", id])?;
        let response: MessageResponse = self.send(request).await?;
        Ok(response.message)
    }

    // ============ Dashboard ============

    /// Summary counters as computed by the backend
    pub async fn fetch_dashboard_stats(&self, session: &Session) -> ClientResult<DashboardStats> {
        let request = self.authed(session, Method::GET, &["dashboard", "stats"])?;
        self.send(request).await
    }

    /// Per-category distribution as computed by the backend
    pub async fn fetch_stock_distribution(
        &self,
        session: &Session,
    ) -> ClientResult<Vec<StockDistribution>> {
        let request = self.authed(session, Method::GET, &["dashboard", "stock-distribution"])?;
        self.send(request).await
    }

    /// Load the sample catalogue (no-op on the server if data exists)
    pub async fn seed_data(&self) -> ClientResult<String> {
        let response: MessageResponse = self.send(self.request(Method::POST, &["seed-data"])).await?;
        Ok(response.message)
    }

    // ============ Plumbing ============

    /// Endpoint URL below the base; each segment is percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client
            .request(method, self.url(segments))
            .header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string())
    }

    /// Build an authenticated request, refusing expired sessions up front
    fn authed(
        &self,
        session: &Session,
        method: Method,
        segments: &[&str],
    ) -> ClientResult<RequestBuilder> {
        if session.is_expired(Utc::now(), self.token_lifetime) {
            return Err(ClientError::SessionExpired);
        }
        Ok(self
            .request(method, segments)
            .header(reqwest::header::AUTHORIZATION, session.authorization()))
    }

    /// Send a request and decode a JSON success body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let request = request.build()?;
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            request_id = %request_id,
            "Sending API request"
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_transport)?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                request_id = %request_id,
                "API request failed"
            );
            return Err(ClientError::from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InventoryApi for ApiClient {
    async fn products(&self, session: &Session, filter: &ProductFilter) -> ClientResult<Vec<Product>> {
        self.list_products(session, filter).await
    }

    async fn categories(&self, session: &Session) -> ClientResult<Vec<Category>> {
        self.list_categories(session).await
    }

    async fn dashboard_stats(&self, session: &Session) -> ClientResult<DashboardStats> {
        self.fetch_dashboard_stats(session).await
    }
}

/// Run local validation and convert failures into a client error
fn validate<T: Validate>(payload: &T) -> ClientResult<()> {
    payload
        .validate()
        .map_err(|errors| ClientError::Validation(describe_validation_errors(&errors)))
}
