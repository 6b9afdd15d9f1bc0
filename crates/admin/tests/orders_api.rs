//! HTTP-level tests for checkout, order lookup and status changes.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, decimal, get, get_auth, post_json, post_json_auth, send};
use inventory_core::status::LaptopStatus;
use inventory_db::models::laptop::UpdateLaptop;
use inventory_db::repositories::{LaptopRepo, OrderRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn checkout_body(items: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "customer_name": "Ada Lovelace",
        "email": "Ada@Example.com",
        "phone": "555-0100",
        "address": "12 Analytical Row",
        "items": items,
    })
}

async fn place(pool: &PgPool, items: serde_json::Value) -> serde_json::Value {
    let response = post_json(common::build_test_app(pool.clone()), "/api/orders", checkout_body(items)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn set_status(pool: &PgPool, cookie: &str, order_id: &str, status: &str) -> axum::http::Response<axum::body::Body> {
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/admin/orders/{order_id}/status"),
        serde_json::json!({ "status": status }),
        cookie,
    )
    .await
}

async fn status_of(pool: &PgPool, laptop_id: i64) -> LaptopStatus {
    LaptopRepo::find_by_id(pool, laptop_id).await.unwrap().unwrap().status
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_prices_server_side_and_snapshots_items(pool: PgPool) {
    let a = common::seed_laptop(&pool, "Dell", 500).await;
    let b = common::seed_laptop(&pool, "HP", 300).await;
    let ram = common::seed_part(&pool, "16GB DDR4", "RAM", 50).await;

    let json = place(
        &pool,
        serde_json::json!([
            { "laptop_id": a.id },
            { "laptop_id": b.id, "spare_part_ids": [ram.id], "price": "1" },
        ]),
    )
    .await;
    assert_eq!(json["success"], true);
    assert_eq!(json["order_id"], "ORD000001");
    assert_eq!(decimal(&json["total_amount"]), Decimal::new(850, 0));
    assert_eq!(json["unavailable"], serde_json::json!([]));

    let order = OrderRepo::find_by_order_id(&pool, "ORD000001").await.unwrap().unwrap();
    assert_eq!(order.status.as_str(), "unconfirmed");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[1].spare_parts[0].name, "16GB DDR4");

    // Placing an order does not reserve the laptops.
    assert_eq!(status_of(&pool, a.id).await, LaptopStatus::Available);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_reports_unavailable_lines(pool: PgPool) {
    let a = common::seed_laptop(&pool, "Dell", 500).await;
    let sold = common::seed_laptop(&pool, "HP", 300).await;
    LaptopRepo::update(
        &pool,
        sold.id,
        &UpdateLaptop {
            status: Some(LaptopStatus::Sold),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let sold_before = LaptopRepo::find_by_id(&pool, sold.id).await.unwrap().unwrap();

    let json = place(
        &pool,
        serde_json::json!([{ "laptop_id": a.id }, { "laptop_id": sold.id }, { "laptop_id": 999999 }]),
    )
    .await;
    assert_eq!(decimal(&json["total_amount"]), Decimal::new(500, 0));
    let unavailable = json["unavailable"].as_array().unwrap();
    assert_eq!(unavailable.len(), 2);
    assert_eq!(unavailable[0]["laptop_id"], sold.id);
    assert_eq!(unavailable[0]["reason"], "laptop_not_available");
    assert_eq!(unavailable[1]["reason"], "laptop_not_found");

    // Checkout leaves the catalog as it found it.
    let sold_after = LaptopRepo::find_by_id(&pool, sold.id).await.unwrap().unwrap();
    assert_eq!(sold_after.status, LaptopStatus::Sold);
    assert_eq!(sold_after.date_sold, sold_before.date_sold);
    assert_eq!(status_of(&pool, a.id).await, LaptopStatus::Available);
    assert!(LaptopRepo::find_by_id(&pool, 999999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_with_nothing_purchasable_writes_no_order(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/orders",
        checkout_body(serde_json::json!([{ "laptop_id": 424242 }])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAVAILABLE");
    assert_eq!(json["unavailable"][0]["laptop_id"], 424242);

    let counts = OrderRepo::counts(&pool).await.unwrap();
    assert_eq!(counts.total, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_with_empty_items_is_422(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/orders",
        checkout_body(serde_json::json!([])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "EMPTY_CART");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_missing_customer_field_is_400(pool: PgPool) {
    let laptop = common::seed_laptop(&pool, "Dell", 500).await;
    let mut body = checkout_body(serde_json::json!([{ "laptop_id": laptop.id }]));
    body.as_object_mut().unwrap().remove("phone");

    let response = post_json(common::build_test_app(pool.clone()), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("phone"));

    let mut body = checkout_body(serde_json::json!([]));
    body.as_object_mut().unwrap().remove("items");
    let response = post_json(common::build_test_app(pool), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_checkout_body_gets_error_envelope(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/orders",
        checkout_body(serde_json::json!("nope")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("items"));

    let counts = OrderRepo::counts(&pool).await.unwrap();
    assert_eq!(counts.total, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_with_duplicate_laptop_is_400(pool: PgPool) {
    let laptop = common::seed_laptop(&pool, "Dell", 500).await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/orders",
        checkout_body(serde_json::json!([{ "laptop_id": laptop.id }, { "laptop_id": laptop.id }])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn lookup_requires_matching_email(pool: PgPool) {
    let laptop = common::seed_laptop(&pool, "Dell", 500).await;
    place(&pool, serde_json::json!([{ "laptop_id": laptop.id }])).await;

    let found = get(
        common::build_test_app(pool.clone()),
        "/api/orders/lookup?email=ada@example.com&order_id=ORD000001",
    )
    .await;
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(body_json(found).await["order"]["order_id"], "ORD000001");

    let wrong = get(
        common::build_test_app(pool.clone()),
        "/api/orders/lookup?email=eve@example.com&order_id=ORD000001",
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::NOT_FOUND);

    let incomplete = get(common::build_test_app(pool.clone()), "/api/orders/lookup?email=ada@example.com").await;
    assert_eq!(incomplete.status(), StatusCode::BAD_REQUEST);

    let direct = get(common::build_test_app(pool), "/api/orders/ORD000001").await;
    assert_eq!(direct.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Status changes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_an_order_marks_its_laptops_sold(pool: PgPool) {
    let cookie = common::admin_cookie(&pool).await;
    let a = common::seed_laptop(&pool, "Dell", 500).await;
    let b = common::seed_laptop(&pool, "HP", 300).await;
    let untouched = common::seed_laptop(&pool, "Asus", 200).await;
    place(&pool, serde_json::json!([{ "laptop_id": a.id }, { "laptop_id": b.id }])).await;

    let confirmed = set_status(&pool, &cookie, "ORD000001", "confirmed").await;
    assert_eq!(confirmed.status(), StatusCode::OK);
    assert_eq!(status_of(&pool, a.id).await, LaptopStatus::Available);

    let completed = set_status(&pool, &cookie, "ORD000001", "completed").await;
    assert_eq!(completed.status(), StatusCode::OK);
    assert_eq!(body_json(completed).await["order"]["status"], "completed");
    assert_eq!(status_of(&pool, a.id).await, LaptopStatus::Sold);
    assert_eq!(status_of(&pool, b.id).await, LaptopStatus::Sold);
    assert_eq!(status_of(&pool, untouched.id).await, LaptopStatus::Available);

    let laptop = LaptopRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert!(laptop.date_sold.is_some());

    // Leaving `completed` does not restore the laptops.
    let reopened = set_status(&pool, &cookie, "ORD000001", "unconfirmed").await;
    assert_eq!(reopened.status(), StatusCode::OK);
    assert_eq!(status_of(&pool, a.id).await, LaptopStatus::Sold);

    // The order still owns its laptops, so it can be completed again.
    let again = set_status(&pool, &cookie, "ORD000001", "completed").await;
    assert_eq!(again.status(), StatusCode::OK);
    let resold = LaptopRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(resold.date_sold, laptop.date_sold);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn laptop_cannot_be_sold_by_two_orders(pool: PgPool) {
    let cookie = common::admin_cookie(&pool).await;
    let shared = common::seed_laptop(&pool, "Dell", 500).await;
    let other = common::seed_laptop(&pool, "HP", 300).await;
    place(&pool, serde_json::json!([{ "laptop_id": shared.id }])).await;
    place(&pool, serde_json::json!([{ "laptop_id": shared.id }, { "laptop_id": other.id }])).await;

    let first = set_status(&pool, &cookie, "ORD000001", "completed").await;
    assert_eq!(first.status(), StatusCode::OK);
    let sold_at = LaptopRepo::find_by_id(&pool, shared.id).await.unwrap().unwrap().date_sold;

    let second = set_status(&pool, &cookie, "ORD000002", "completed").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains(&shared.id.to_string()));

    // Nothing from the rejected completion sticks.
    let order = OrderRepo::find_by_order_id(&pool, "ORD000002").await.unwrap().unwrap();
    assert_eq!(order.status.as_str(), "unconfirmed");
    assert_eq!(status_of(&pool, other.id).await, LaptopStatus::Available);
    let shared_now = LaptopRepo::find_by_id(&pool, shared.id).await.unwrap().unwrap();
    assert_eq!(shared_now.date_sold, sold_at);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_an_order_for_a_hand_sold_laptop_is_conflict(pool: PgPool) {
    let cookie = common::admin_cookie(&pool).await;
    let laptop = common::seed_laptop(&pool, "Dell", 500).await;
    place(&pool, serde_json::json!([{ "laptop_id": laptop.id }])).await;
    LaptopRepo::update(
        &pool,
        laptop.id,
        &UpdateLaptop {
            status: Some(LaptopStatus::Sold),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let response = set_status(&pool, &cookie, "ORD000001", "completed").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cascade_with_deleted_laptop_rolls_back(pool: PgPool) {
    let cookie = common::admin_cookie(&pool).await;
    let a = common::seed_laptop(&pool, "Dell", 500).await;
    let b = common::seed_laptop(&pool, "HP", 300).await;
    place(&pool, serde_json::json!([{ "laptop_id": a.id }, { "laptop_id": b.id }])).await;
    assert!(LaptopRepo::delete(&pool, b.id).await.unwrap());

    let response = set_status(&pool, &cookie, "ORD000001", "completed").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let order = OrderRepo::find_by_order_id(&pool, "ORD000001").await.unwrap().unwrap();
    assert_eq!(order.status.as_str(), "unconfirmed");
    assert_eq!(status_of(&pool, a.id).await, LaptopStatus::Available);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_or_missing_status_is_400_and_unknown_order_404(pool: PgPool) {
    let cookie = common::admin_cookie(&pool).await;
    let laptop = common::seed_laptop(&pool, "Dell", 500).await;
    place(&pool, serde_json::json!([{ "laptop_id": laptop.id }])).await;

    let invalid = set_status(&pool, &cookie, "ORD000001", "shipped").await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let missing = post_json_auth(
        common::build_test_app(pool.clone()),
        "/admin/orders/ORD000001/status",
        serde_json::json!({}),
        &cookie,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let unknown = set_status(&pool, &cookie, "ORD999999", "confirmed").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn api_status_patch_requires_admin_session(pool: PgPool) {
    let laptop = common::seed_laptop(&pool, "Dell", 500).await;
    place(&pool, serde_json::json!([{ "laptop_id": laptop.id }])).await;

    let anonymous = send(
        common::build_test_app(pool.clone()),
        Method::PATCH,
        "/api/orders/ORD000001",
        Some(serde_json::json!({ "status": "in progress" })),
        None,
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let cookie = common::admin_cookie(&pool).await;
    let patched = send(
        common::build_test_app(pool),
        Method::PATCH,
        "/api/orders/ORD000001",
        Some(serde_json::json!({ "status": "in progress" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(patched.status(), StatusCode::OK);
    assert_eq!(body_json(patched).await["order"]["status"], "in_progress");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_order_list_filters_by_status(pool: PgPool) {
    let cookie = common::admin_cookie(&pool).await;
    let a = common::seed_laptop(&pool, "Dell", 500).await;
    let b = common::seed_laptop(&pool, "HP", 300).await;
    place(&pool, serde_json::json!([{ "laptop_id": a.id }])).await;
    place(&pool, serde_json::json!([{ "laptop_id": b.id }])).await;
    set_status(&pool, &cookie, "ORD000002", "cancelled").await;

    let all = body_json(get_auth(common::build_test_app(pool.clone()), "/admin/orders", &cookie).await).await;
    assert_eq!(all["orders"].as_array().unwrap().len(), 2);
    assert_eq!(all["statuses"].as_array().unwrap().len(), 5);

    let cancelled = body_json(
        get_auth(common::build_test_app(pool), "/admin/orders?status=cancelled", &cookie).await,
    )
    .await;
    let orders = cancelled["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["order_id"], "ORD000002");
}
