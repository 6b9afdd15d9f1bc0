//! Periodic eviction of idle session carts.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::cart_store::CartStore;

/// How often expired carts are swept.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(600);

/// Drop expired carts every `interval` until `cancel` is triggered.
pub async fn run(carts: Arc<CartStore>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        ttl_secs = carts.ttl().as_secs(),
        interval_secs = interval.as_secs(),
        "Cart expiry job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Cart expiry job stopping");
                break;
            }
            _ = ticker.tick() => {
                let dropped = carts.sweep_expired().await;
                if dropped > 0 {
                    let remaining = carts.session_count().await;
                    tracing::info!(dropped, remaining, "Expired carts dropped");
                } else {
                    tracing::debug!("Cart expiry: nothing to drop");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sweeps_until_cancelled() {
        let carts = Arc::new(CartStore::new(Duration::ZERO));
        carts
            .update("a", |cart| cart.add(1, vec![], None))
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            carts.clone(),
            Duration::from_millis(10),
            cancel.clone(),
        ));

        for _ in 0..200 {
            if carts.session_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(carts.session_count().await, 0);

        cancel.cancel();
        handle.await.unwrap();
    }
}
