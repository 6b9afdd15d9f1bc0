pub mod auth;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{cart, checkout, orders, shop};
use crate::state::AppState;

/// Build the storefront route tree.
///
/// ```text
/// GET    /shop                     available laptops (?brand, ?price_min, ?price_max)
/// GET    /shop/brands              brands for the shop filter
/// GET    /laptops/{id}             laptop + spare parts
/// GET    /cart                     priced cart with warnings
/// POST   /cart/add                 {laptop_id, spare_part_ids, quantity?}
/// POST   /cart/update              {laptop_id, spare_part_ids}
/// POST   /cart/remove/{laptop_id}
/// POST   /cart/clear
/// POST   /checkout                 customer details; places the order
/// GET    /orders/track             by email + order_id
/// GET    /orders/{order_id}        confirmation
/// ```
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/shop", get(shop::list))
        .route("/shop/brands", get(shop::brands))
        .route("/laptops/{id}", get(shop::laptop))
        .route("/cart", get(cart::get))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove/{laptop_id}", post(cart::remove))
        .route("/cart/clear", post(cart::clear))
        .route("/checkout", post(checkout::checkout))
        .route("/orders/track", get(orders::track))
        .route("/orders/{order_id}", get(orders::get))
}
