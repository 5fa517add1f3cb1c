//! Client tests against an in-process stub of the inventory API

use axum::{
    extract::{Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use stacko::client::{ApiClient, ClientError, InventorySnapshot, Session, REQUEST_ID_HEADER};
use stacko::config::{ApiConfig, SessionConfig};
use stacko::inventory::{CategoryCreate, ProductCreate, ProductFilter, UserLogin};
use stacko::report::round_money;
use std::sync::{Arc, Mutex};

const TOKEN: &str = "tok-1";

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Clone, Default)]
struct Stub {
    queries: Arc<Mutex<Vec<String>>>,
    request_ids: Arc<Mutex<Vec<String>>>,
}

fn fail(status: StatusCode, detail: Value) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

fn authorize(stub: &Stub, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    if let Some(id) = headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        stub.request_ids.lock().unwrap().push(id.to_string());
    }
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == format!("Bearer {}", TOKEN) => Ok(()),
        _ => Err(fail(
            StatusCode::UNAUTHORIZED,
            json!("Could not validate credentials"),
        )),
    }
}

fn user() -> Value {
    json!({
        "id": "u-1",
        "email": "admin@example.com",
        "name": "Admin",
        "created_at": "2024-01-15T10:30:00Z"
    })
}

fn products() -> Value {
    json!([
        {
            "id": "p-1", "name": "Standing Desk", "sku": "FURN-001",
            "category": "Furniture", "quantity": 2, "unit_price": 199.99,
            "reorder_level": 5
        },
        {
            "id": "p-2", "name": "USB-C Cable", "sku": "ELEC-001",
            "category": "Electronics", "quantity": 30, "unit_price": 4.5,
            "reorder_level": 10
        },
        {
            "id": "p-3", "name": "Garden Chair", "sku": "GARD-001",
            "category": "Garden", "quantity": 1, "unit_price": 50.0,
            "reorder_level": 2
        }
    ])
}

async fn login(Json(body): Json<Value>) -> Reply {
    if body["password"] != "secret123" {
        return Err(fail(
            StatusCode::UNAUTHORIZED,
            json!("Incorrect email or password"),
        ));
    }
    Ok(Json(json!({
        "access_token": TOKEN,
        "token_type": "bearer",
        "user": user()
    })))
}

async fn me(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    authorize(&stub, &headers)?;
    Ok(Json(user()))
}

async fn list_products(
    State(stub): State<Stub>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Reply {
    authorize(&stub, &headers)?;
    stub.queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());
    Ok(Json(products()))
}

async fn create_product(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Reply {
    authorize(&stub, &headers)?;
    if body["sku"] == "FURN-001" {
        return Err(fail(StatusCode::BAD_REQUEST, json!("SKU already exists")));
    }
    body["id"] = json!("p-new");
    body["created_at"] = json!("2024-02-01T08:00:00Z");
    Ok(Json(body))
}

async fn delete_product(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    authorize(&stub, &headers)?;
    if id != "p-1" {
        return Err(fail(StatusCode::NOT_FOUND, json!("Product not found")));
    }
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

async fn list_categories(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    authorize(&stub, &headers)?;
    Ok(Json(json!([
        { "id": "c-1", "name": "Furniture", "description": "Office furniture" },
        { "id": "c-2", "name": "Electronics" }
    ])))
}

async fn create_category(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    authorize(&stub, &headers)?;
    Err(fail(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!([{ "loc": ["body", "name"], "msg": "Category already exists", "type": "value_error" }]),
    ))
}

async fn dashboard_stats(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    authorize(&stub, &headers)?;
    Ok(Json(json!({
        "total_products": 3,
        "total_categories": 2,
        "total_stock_value": 584.98,
        "total_quantity": 33,
        "low_stock_count": 2
    })))
}

async fn stock_distribution(State(stub): State<Stub>, headers: HeaderMap) -> Reply {
    authorize(&stub, &headers)?;
    Ok(Json(json!([
        { "category": "Furniture", "count": 1, "total_value": 399.98 },
        { "category": "Electronics", "count": 1, "total_value": 135.0 },
        { "category": "Garden", "count": 1, "total_value": 50.0 }
    ])))
}

async fn seed() -> Json<Value> {
    Json(json!({ "message": "Sample data seeded successfully" }))
}

async fn spawn_stub() -> (ApiClient, Stub) {
    let stub = Stub::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/:id", delete(delete_product))
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/dashboard/stock-distribution", get(stock_distribution))
        .route("/api/seed-data", post(seed))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ApiConfig {
        base_url: format!("http://{}/api/", addr),
        request_timeout_secs: 5,
    };
    let client = ApiClient::new(&config, &SessionConfig::default()).unwrap();
    (client, stub)
}

async fn logged_in(client: &ApiClient) -> Session {
    client
        .login(&UserLogin {
            email: "admin@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_login_and_me() {
    let (client, stub) = spawn_stub().await;

    let session = logged_in(&client).await;
    assert_eq!(session.authorization(), "Bearer tok-1");
    assert_eq!(session.user.name, "Admin");

    let user = client.me(&session).await.unwrap();
    assert_eq!(user.email, "admin@example.com");

    let ids = stub.request_ids.lock().unwrap();
    assert_eq!(ids.len(), 1);
    assert!(uuid::Uuid::parse_str(&ids[0]).is_ok());
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let (client, _) = spawn_stub().await;

    let err = client
        .login(&UserLogin {
            email: "admin@example.com".to_string(),
            password: "nope".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Incorrect email or password"));
    assert!(err.requires_login());
}

#[tokio::test]
async fn test_rejected_token_requires_login() {
    let (client, _) = spawn_stub().await;

    let mut session = logged_in(&client).await;
    session.access_token = "forged".to_string();

    let err = client.list_categories(&session).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Could not validate credentials"));
    assert!(err.requires_login());
}

#[tokio::test]
async fn test_product_filter_sent_as_query() {
    let (client, stub) = spawn_stub().await;
    let session = logged_in(&client).await;

    client
        .list_products(&session, &ProductFilter::default())
        .await
        .unwrap();
    let products = client
        .list_products(&session, &ProductFilter::default().category("Furniture").low_stock())
        .await
        .unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].sku, "FURN-001");

    let queries = stub.queries.lock().unwrap();
    assert_eq!(queries[0], "");
    assert_eq!(queries[1], "category=Furniture&low_stock=true");
}

#[tokio::test]
async fn test_create_and_delete_product() {
    let (client, _) = spawn_stub().await;
    let session = logged_in(&client).await;

    let created = client
        .create_product(
            &session,
            &ProductCreate {
                name: "Monitor Arm".to_string(),
                sku: "FURN-002".to_string(),
                category: "Furniture".to_string(),
                quantity: 7,
                unit_price: Decimal::new(4950, 2),
                reorder_level: 3,
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, "p-new");
    assert_eq!(created.unit_price, Decimal::new(4950, 2));
    assert!(created.created_at.is_some());

    let message = client.delete_product(&session, "p-1").await.unwrap();
    assert_eq!(message, "Product deleted successfully");

    let err = client.delete_product(&session, "p-404").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref m) if m == "Product not found"));
}

#[tokio::test]
async fn test_duplicate_sku_is_validation_error() {
    let (client, _) = spawn_stub().await;
    let session = logged_in(&client).await;

    let err = client
        .create_product(
            &session,
            &ProductCreate {
                name: "Another Desk".to_string(),
                sku: "FURN-001".to_string(),
                category: "Furniture".to_string(),
                quantity: 1,
                unit_price: Decimal::ONE,
                reorder_level: 1,
                description: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(ref m) if m == "SKU already exists"));
}

#[tokio::test]
async fn test_field_errors_are_described() {
    let (client, _) = spawn_stub().await;
    let session = logged_in(&client).await;

    let err = client
        .create_category(
            &session,
            &CategoryCreate {
                name: "Furniture".to_string(),
                description: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(ref m) if m == "name: Category already exists"));
}

#[tokio::test]
async fn test_snapshot_matches_backend() {
    let (client, _) = spawn_stub().await;
    let session = logged_in(&client).await;

    let snapshot = InventorySnapshot::load(&client, &session).await.unwrap();
    assert_eq!(snapshot.products.len(), 3);
    assert_eq!(snapshot.categories.len(), 2);

    let reconciliation = snapshot.reconcile();
    assert!(reconciliation.is_consistent(), "{:?}", reconciliation.discrepancies);

    let stats = reconciliation.stats;
    assert_eq!(stats.total_products, 3);
    assert_eq!(stats.low_stock_count, 2);
    assert_eq!(round_money(stats.total_stock_value), Decimal::new(58498, 2));

    let report = snapshot.report(2);
    assert_eq!(report.top_products[0].id, "p-1");
    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.orphaned.len(), 1);
    assert_eq!(report.orphaned[0].category, "Garden");
}

#[tokio::test]
async fn test_backend_distribution_matches_derived() {
    let (client, _) = spawn_stub().await;
    let session = logged_in(&client).await;

    let reported = client.fetch_stock_distribution(&session).await.unwrap();
    let snapshot = InventorySnapshot::load(&client, &session).await.unwrap();
    let derived = snapshot.report(5).distribution;

    assert_eq!(reported.len(), derived.len());
    for (r, d) in reported.iter().zip(&derived) {
        assert_eq!(r.category, d.category);
        assert_eq!(r.count, d.count);
        assert_eq!(round_money(r.total_value), round_money(d.total_value));
    }
}

#[tokio::test]
async fn test_seed_data() {
    let (client, _) = spawn_stub().await;
    let message = client.seed_data().await.unwrap();
    assert_eq!(message, "Sample data seeded successfully");
}

#[tokio::test]
async fn test_unreachable_api_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig {
        base_url: format!("http://{}/api", addr),
        request_timeout_secs: 5,
    };
    let client = ApiClient::new(&config, &SessionConfig::default()).unwrap();

    let err = client.seed_data().await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable));
}
