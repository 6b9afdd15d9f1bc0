//! In-memory session carts.
//!
//! Carts are keyed by the random id in the `cart_session` cookie. The store
//! only holds references (laptop and spare part ids); prices are resolved
//! from the admin API whenever a cart is read. Concurrent writes to one
//! cart are serialized by the lock; the last write wins.
//!
//! Only non-empty carts are stored. A cart untouched for longer than the
//! store's TTL reads as empty and is dropped by [`CartStore::sweep_expired`].

use std::collections::HashMap;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderName;
use inventory_core::cart::Cart;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::cookies::{cart_cookie, read_cookie, CART_COOKIE};
use crate::state::AppState;

#[derive(Debug)]
struct StoredCart {
    cart: Cart,
    touched: Instant,
}

impl StoredCart {
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.touched) < ttl
    }
}

#[derive(Debug)]
pub struct CartStore {
    carts: RwLock<HashMap<String, StoredCart>>,
    ttl: Duration,
}

impl CartStore {
    /// A store whose carts expire `ttl` after their last change.
    pub fn new(ttl: Duration) -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A copy of the session's cart; empty when none exists or it expired.
    pub async fn get(&self, session_id: &str) -> Cart {
        let now = Instant::now();
        self.carts
            .read()
            .await
            .get(session_id)
            .filter(|stored| stored.is_live(now, self.ttl))
            .map(|stored| stored.cart.clone())
            .unwrap_or_default()
    }

    /// Run `f` against the session's cart.
    ///
    /// The cart is stored only if `f` leaves it non-empty, so requests that
    /// merely touch an empty cart never grow the store.
    pub async fn update<R>(&self, session_id: &str, f: impl FnOnce(&mut Cart) -> R) -> R {
        let now = Instant::now();
        let mut carts = self.carts.write().await;
        let mut cart = carts
            .remove(session_id)
            .filter(|stored| stored.is_live(now, self.ttl))
            .map(|stored| stored.cart)
            .unwrap_or_default();

        let result = f(&mut cart);
        if !cart.is_empty() {
            carts.insert(
                session_id.to_string(),
                StoredCart {
                    cart,
                    touched: now,
                },
            );
        }
        result
    }

    /// Drop the session's cart entirely.
    pub async fn clear(&self, session_id: &str) {
        self.carts.write().await.remove(session_id);
    }

    /// Remove every expired cart, returning how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut carts = self.carts.write().await;
        let before = carts.len();
        carts.retain(|_, stored| stored.is_live(now, self.ttl));
        before - carts.len()
    }

    /// Number of sessions holding a cart.
    pub async fn session_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

/// The visitor's cart session, read from the `cart_session` cookie.
///
/// A visitor without the cookie gets a fresh id; handlers return
/// [`CartSession::set_cookie`] so the browser keeps it.
#[derive(Debug, Clone)]
pub struct CartSession {
    pub id: String,
    fresh: bool,
    secure: bool,
}

impl CartSession {
    /// `Set-Cookie` header for a newly issued session, nothing otherwise.
    pub fn set_cookie(&self) -> Option<(HeaderName, String)> {
        self.fresh
            .then(|| (SET_COOKIE, cart_cookie(&self.id, self.secure)))
    }
}

impl FromRequestParts<AppState> for CartSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secure = state.config.cookie_secure;
        let existing = read_cookie(&parts.headers, CART_COOKIE)
            .filter(|id| Uuid::parse_str(id).is_ok());

        Ok(match existing {
            Some(id) => CartSession {
                id,
                fresh: false,
                secure,
            },
            None => CartSession {
                id: Uuid::new_v4().to_string(),
                fresh: true,
                secure,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 3600);

    #[tokio::test]
    async fn carts_are_isolated_per_session() {
        let store = CartStore::new(DAY);
        store
            .update("a", |cart| cart.add(1, vec![], None))
            .await
            .unwrap();

        assert_eq!(store.get("a").await.laptop_ids(), vec![1]);
        assert!(store.get("b").await.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_the_session() {
        let store = CartStore::new(DAY);
        store
            .update("a", |cart| cart.add(1, vec![2], None))
            .await
            .unwrap();
        assert_eq!(store.session_count().await, 1);

        store.clear("a").await;
        assert!(store.get("a").await.is_empty());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn emptying_a_cart_removes_the_session() {
        let store = CartStore::new(DAY);
        for i in 0..100 {
            let count = store
                .update(&format!("visitor-{i}"), |cart| {
                    cart.remove(1);
                    cart.len()
                })
                .await;
            assert_eq!(count, 0);
        }
        assert_eq!(store.session_count().await, 0);

        store
            .update("a", |cart| cart.add(1, vec![], None))
            .await
            .unwrap();
        store.update("a", |cart| cart.remove(1)).await;
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn rejected_add_does_not_store_a_cart() {
        let store = CartStore::new(DAY);
        let result = store.update("a", |cart| cart.add(1, vec![], Some(3))).await;
        assert!(result.is_err());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn expired_carts_read_empty_and_are_swept() {
        let store = CartStore::new(Duration::ZERO);
        store
            .update("a", |cart| cart.add(1, vec![], None))
            .await
            .unwrap();
        assert_eq!(store.session_count().await, 1);
        assert!(store.get("a").await.is_empty());

        assert_eq!(store.sweep_expired().await, 1);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn live_carts_survive_a_sweep() {
        let store = CartStore::new(DAY);
        store
            .update("a", |cart| cart.add(1, vec![], None))
            .await
            .unwrap();
        assert_eq!(store.sweep_expired().await, 0);
        assert_eq!(store.get("a").await.laptop_ids(), vec![1]);
    }

    #[test]
    fn only_fresh_sessions_set_a_cookie() {
        let fresh = CartSession {
            id: "abc".into(),
            fresh: true,
            secure: false,
        };
        let (_, value) = fresh.set_cookie().unwrap();
        assert!(value.starts_with("cart_session=abc"));

        let existing = CartSession {
            fresh: false,
            ..fresh
        };
        assert!(existing.set_cookie().is_none());
    }
}
