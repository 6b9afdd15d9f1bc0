#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use inventory_core::catalog::{CatalogLaptop, CatalogPart, CatalogSnapshot};
use inventory_core::checkout::{plan_checkout, PlaceOrderRequest, PlacedOrder};
use inventory_core::error::CoreError;
use inventory_core::order_id::format_order_id;
use inventory_core::status::{LaptopStatus, OrderStatus};
use inventory_core::types::DbId;
use inventory_core::wire::ErrorBody;
use inventory_db::models::order::Order;
use inventory_guest::admin_api::{AdminApi, AdminApiError, LaptopQuery};
use inventory_guest::auth::jwt::JwtConfig;
use inventory_guest::cart_store::CartStore;
use inventory_guest::config::GuestConfig;
use inventory_guest::router::build_app_router;
use inventory_guest::state::AppState;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

// ---------------------------------------------------------------------------
// In-memory admin API
// ---------------------------------------------------------------------------

/// Admin service stand-in. Checkout re-prices against its own catalog the
/// way the real service does and answers with the same error envelopes.
#[derive(Default)]
pub struct FakeAdminApi {
    pub laptops: Mutex<Vec<CatalogLaptop>>,
    pub parts: Mutex<Vec<CatalogPart>>,
    pub orders: Mutex<Vec<Order>>,
    pub placed: Mutex<Vec<PlaceOrderRequest>>,
    pub down: AtomicBool,
}

impl FakeAdminApi {
    pub fn with_catalog(laptops: Vec<CatalogLaptop>, parts: Vec<CatalogPart>) -> Arc<Self> {
        Arc::new(Self {
            laptops: Mutex::new(laptops),
            parts: Mutex::new(parts),
            ..Default::default()
        })
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn set_status(&self, laptop_id: DbId, status: LaptopStatus) {
        let mut laptops = self.laptops.lock().unwrap();
        if let Some(l) = laptops.iter_mut().find(|l| l.id == laptop_id) {
            l.status = status;
        }
    }

    fn check_up(&self) -> Result<(), AdminApiError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AdminApiError::Status {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        Ok(())
    }
}

fn rejected(err: CoreError) -> AdminApiError {
    let (status, body) = match err {
        CoreError::EmptyCart => (422, ErrorBody::new("EMPTY_CART", "Cart is empty")),
        CoreError::Unavailable(items) => {
            let mut body = ErrorBody::new("UNAVAILABLE", "Nothing can be ordered");
            body.unavailable = items;
            (422, body)
        }
        other => (400, ErrorBody::new("VALIDATION_ERROR", other.to_string())),
    };
    AdminApiError::Rejected { status, body }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    async fn list_laptops(&self, query: &LaptopQuery) -> Result<Vec<CatalogLaptop>, AdminApiError> {
        self.check_up()?;
        Ok(self
            .laptops
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.status == LaptopStatus::Available)
            .filter(|l| {
                query.brand.as_deref().map_or(true, |b| {
                    l.brand.to_lowercase().contains(&b.to_lowercase())
                })
            })
            .filter(|l| query.price_min.map_or(true, |p| l.selling_price >= p))
            .filter(|l| query.price_max.map_or(true, |p| l.selling_price <= p))
            .cloned()
            .collect())
    }

    async fn list_brands(&self) -> Result<Vec<String>, AdminApiError> {
        self.check_up()?;
        let mut brands: Vec<String> = self
            .laptops
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.brand.clone())
            .collect();
        brands.sort();
        brands.dedup();
        Ok(brands)
    }

    async fn get_laptop(&self, id: DbId) -> Result<Option<CatalogLaptop>, AdminApiError> {
        self.check_up()?;
        Ok(self.laptops.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn list_spare_parts(&self) -> Result<Vec<CatalogPart>, AdminApiError> {
        self.check_up()?;
        Ok(self.parts.lock().unwrap().clone())
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlacedOrder, AdminApiError> {
        self.check_up()?;
        self.placed.lock().unwrap().push(request.clone());

        let customer = request.customer.clone().into_customer().map_err(rejected)?;
        let snapshot = CatalogSnapshot::new(
            self.laptops.lock().unwrap().clone(),
            self.parts.lock().unwrap().clone(),
        );
        let lines = request.items.clone().unwrap_or_default();
        let plan = plan_checkout(&lines, &snapshot).map_err(rejected)?;

        let mut orders = self.orders.lock().unwrap();
        let id = orders.len() as DbId + 1;
        let order_id = format_order_id(id);
        orders.push(Order {
            id,
            order_id: order_id.clone(),
            status: OrderStatus::Unconfirmed,
            items: sqlx::types::Json(plan.items),
            total_amount: plan.total_amount,
            customer_name: customer.name,
            customer_email: customer.email,
            customer_phone: customer.phone,
            delivery_address: customer.address,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        Ok(PlacedOrder {
            order_id,
            total_amount: plan.total_amount,
            unavailable: plan.unavailable,
        })
    }

    async fn get_order(&self, order_id: &str) -> Result<Option<Order>, AdminApiError> {
        self.check_up()?;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned())
    }

    async fn lookup_order(
        &self,
        email: &str,
        order_id: &str,
    ) -> Result<Option<Order>, AdminApiError> {
        Ok(self
            .get_order(order_id)
            .await?
            .filter(|o| o.customer_email.eq_ignore_ascii_case(email)))
    }
}

pub fn laptop(id: DbId, brand: &str, price: i64) -> CatalogLaptop {
    CatalogLaptop {
        id,
        serial_number: format!("SN{id:04}"),
        brand: brand.to_string(),
        model: format!("Model {id}"),
        cpu: None,
        ram: None,
        storage: None,
        screen_size: None,
        graphics: None,
        os: None,
        condition: None,
        description: None,
        selling_price: Decimal::new(price, 0),
        status: LaptopStatus::Available,
        date_purchased: None,
        image: None,
        image_filename: None,
    }
}

pub fn part(id: DbId, name: &str, price: i64) -> CatalogPart {
    CatalogPart {
        id,
        name: name.to_string(),
        part_type: "RAM".to_string(),
        price: Decimal::new(price, 0),
        quantity: 5,
        description: None,
    }
}

/// Two laptops ($500, $300) and one $50 part.
pub fn standard_catalog() -> Arc<FakeAdminApi> {
    FakeAdminApi::with_catalog(
        vec![laptop(1, "Dell", 500), laptop(2, "HP", 300)],
        vec![part(10, "16GB DDR4", 50)],
    )
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub fn test_config() -> GuestConfig {
    GuestConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5001".to_string()],
        request_timeout_secs: 30,
        admin_api_url: "http://admin.invalid/api".to_string(),
        admin_api_timeout_secs: 5,
        cookie_secure: false,
        cart_ttl_hours: 24,
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiry_hours: 24,
        },
    }
}

/// Router backed by `pool` for customer accounts and `api` for everything else.
pub fn build_app(pool: PgPool, api: Arc<FakeAdminApi>) -> Router {
    build_app_with_carts(pool, api).0
}

/// Like [`build_app`], also returning the router's cart store.
pub fn build_app_with_carts(pool: PgPool, api: Arc<FakeAdminApi>) -> (Router, Arc<CartStore>) {
    let config = test_config();
    let carts = Arc::new(CartStore::new(config.cart_ttl()));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        admin_api: api,
        carts: carts.clone(),
    };
    (build_app_router(state, &config), carts)
}

/// A pool that is never connected; for tests that do not touch customer
/// accounts.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://unused@localhost/unused")
        .unwrap()
}

/// Router whose database is never reached.
pub fn build_app_without_db(api: Arc<FakeAdminApi>) -> Router {
    build_app(lazy_pool(), api)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, None, cookie).await
}

pub async fn post(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), cookie).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` pair of a cookie set by `response`, if any.
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .find(|pair| pair.starts_with(&format!("{name}=")))
}

/// Parse a JSON decimal (serialized as a string) for comparison.
pub fn decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
        .parse()
        .unwrap()
}

/// Start a cart session by adding `laptop_id`; returns the session cookie.
pub async fn start_cart(app: &Router, laptop_id: DbId, parts: &[DbId]) -> String {
    let response = post(
        app,
        "/cart/add",
        serde_json::json!({ "laptop_id": laptop_id, "spare_part_ids": parts }),
        None,
    )
    .await;
    assert_eq!(response.status(), 200);
    set_cookie(&response, "cart_session").expect("a new cart session must set a cookie")
}

pub fn customer_details() -> serde_json::Value {
    serde_json::json!({
        "customer_name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
        "address": "12 Analytical Row",
    })
}
