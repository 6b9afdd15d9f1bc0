pub mod auth;
pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    admin_orders, catalog, dashboard, laptops, orders, spare_parts, users, warranties,
};
use crate::state::AppState;

/// Build the public `/api` route tree consumed by the guest storefront.
///
/// ```text
/// GET    /health
/// GET    /laptops                 available laptops (?brand, ?price_min, ?price_max)
/// GET    /laptops/brands          distinct brands of available laptops
/// GET    /laptops/{id}            one laptop, any status
/// GET    /spare-parts             spare parts (?type)
/// GET    /spare-parts/{id}        one spare part
/// POST   /orders                  checkout
/// GET    /orders/lookup           by email + order_id
/// GET    /orders/{order_id}       one order
/// PATCH  /orders/{order_id}       status change (admin session)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route("/laptops", get(catalog::list_laptops))
        .route("/laptops/brands", get(catalog::list_brands))
        .route("/laptops/{id}", get(catalog::get_laptop))
        .route("/spare-parts", get(catalog::list_spare_parts))
        .route("/spare-parts/{id}", get(catalog::get_spare_part))
        .route("/orders", post(orders::place_order))
        .route("/orders/lookup", get(orders::lookup))
        .route(
            "/orders/{order_id}",
            get(orders::get_order).patch(orders::patch_status),
        )
}

/// Build the `/admin` route tree. Every route requires an admin session.
///
/// ```text
/// GET              /dashboard
/// GET, POST        /laptops                      (?status, ?brand, ?price_min, ?price_max)
/// GET, PUT, DELETE /laptops/{id}
/// GET              /laptops/{id}/warranty
/// GET, POST        /spare-parts                  (?type)
/// PUT, DELETE      /spare-parts/{id}
/// GET              /orders                       (?status)
/// GET              /orders/{order_id}
/// POST             /orders/{order_id}/status
/// GET, POST        /warranties                   (?active_only)
/// PUT, DELETE      /warranties/{id}
/// GET, POST        /users
/// ```
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::get))
        .route("/laptops", get(laptops::list).post(laptops::create))
        .route(
            "/laptops/{id}",
            get(laptops::get_by_id)
                .put(laptops::update)
                .delete(laptops::delete),
        )
        .route("/laptops/{id}/warranty", get(laptops::warranty))
        .route(
            "/spare-parts",
            get(spare_parts::list).post(spare_parts::create),
        )
        .route(
            "/spare-parts/{id}",
            put(spare_parts::update).delete(spare_parts::delete),
        )
        .route("/orders", get(admin_orders::list))
        .route("/orders/{order_id}", get(admin_orders::get_by_id))
        .route("/orders/{order_id}/status", post(admin_orders::update_status))
        .route("/warranties", get(warranties::list).post(warranties::create))
        .route(
            "/warranties/{id}",
            put(warranties::update).delete(warranties::delete),
        )
        .route("/users", get(users::list).post(users::create))
}
