//! Client for the admin service's public REST API.
//!
//! The storefront owns no catalog or order data: every laptop, spare part
//! and order it shows is read through [`AdminApi`], and checkout is a
//! single `POST /orders`. [`AdminApiClient`] is the HTTP implementation;
//! tests substitute an in-memory one.

use std::time::Duration;

use async_trait::async_trait;
use inventory_core::catalog::{CatalogLaptop, CatalogPart};
use inventory_core::checkout::{PlaceOrderRequest, PlacedOrder};
use inventory_core::types::{DbId, Money};
use inventory_core::wire::{
    BrandList, Envelope, ErrorBody, LaptopDetail, LaptopList, OrderDetail, OrderLookup,
    SparePartList,
};
use inventory_db::models::order::Order;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Shop listing filters, forwarded as the query string of `GET /laptops`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaptopQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<Money>,
}

/// Errors from the admin API layer.
#[derive(Debug, thiserror::Error)]
pub enum AdminApiError {
    /// The request never produced a usable response (connect, timeout,
    /// TLS, or an unparseable success body).
    #[error("Admin API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The admin service answered with its error envelope.
    #[error("Admin API rejected the request ({status}): {}", .body.error)]
    Rejected { status: u16, body: ErrorBody },

    /// A non-2xx response without a readable error envelope.
    #[error("Admin API error ({status}): {body}")]
    Status { status: u16, body: String },
}

/// Operations the storefront needs from the admin service.
///
/// Lookups by id return `Ok(None)` on 404.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_laptops(&self, query: &LaptopQuery) -> Result<Vec<CatalogLaptop>, AdminApiError>;

    async fn list_brands(&self) -> Result<Vec<String>, AdminApiError>;

    async fn get_laptop(&self, id: DbId) -> Result<Option<CatalogLaptop>, AdminApiError>;

    async fn list_spare_parts(&self) -> Result<Vec<CatalogPart>, AdminApiError>;

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlacedOrder, AdminApiError>;

    async fn get_order(&self, order_id: &str) -> Result<Option<Order>, AdminApiError>;

    async fn lookup_order(&self, email: &str, order_id: &str)
        -> Result<Option<Order>, AdminApiError>;
}

/// HTTP client for the admin service.
pub struct AdminApiClient {
    client: reqwest::Client,
    api_url: String,
}

impl AdminApiClient {
    /// Create a client for the API rooted at `api_url`, e.g.
    /// `http://localhost:5000/api`.
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    // ---- private helpers ----

    /// Convert a non-2xx response into an [`AdminApiError`].
    async fn error_from(response: reqwest::Response) -> AdminApiError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(body) => AdminApiError::Rejected { status, body },
            Err(_) => AdminApiError::Status { status, body },
        }
    }

    /// Unwrap the payload of a successful envelope.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AdminApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json::<Envelope<T>>().await?.body)
    }

    /// Like [`Self::parse_response`], mapping 404 to `None`.
    async fn parse_optional<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, AdminApiError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse_response(response).await.map(Some)
    }
}

#[async_trait]
impl AdminApi for AdminApiClient {
    async fn list_laptops(&self, query: &LaptopQuery) -> Result<Vec<CatalogLaptop>, AdminApiError> {
        let response = self
            .client
            .get(self.url("/laptops"))
            .query(query)
            .send()
            .await?;
        Ok(Self::parse_response::<LaptopList>(response).await?.laptops)
    }

    async fn list_brands(&self) -> Result<Vec<String>, AdminApiError> {
        let response = self.client.get(self.url("/laptops/brands")).send().await?;
        Ok(Self::parse_response::<BrandList>(response).await?.brands)
    }

    async fn get_laptop(&self, id: DbId) -> Result<Option<CatalogLaptop>, AdminApiError> {
        let response = self
            .client
            .get(self.url(&format!("/laptops/{id}")))
            .send()
            .await?;
        Ok(Self::parse_optional::<LaptopDetail>(response)
            .await?
            .map(|d| d.laptop))
    }

    async fn list_spare_parts(&self) -> Result<Vec<CatalogPart>, AdminApiError> {
        let response = self.client.get(self.url("/spare-parts")).send().await?;
        Ok(Self::parse_response::<SparePartList>(response)
            .await?
            .spare_parts)
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlacedOrder, AdminApiError> {
        let response = self
            .client
            .post(self.url("/orders"))
            .json(request)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_order(&self, order_id: &str) -> Result<Option<Order>, AdminApiError> {
        let response = self
            .client
            .get(self.url(&format!("/orders/{order_id}")))
            .send()
            .await?;
        Ok(Self::parse_optional::<OrderDetail<Order>>(response)
            .await?
            .map(|d| d.order))
    }

    async fn lookup_order(
        &self,
        email: &str,
        order_id: &str,
    ) -> Result<Option<Order>, AdminApiError> {
        let query = OrderLookup {
            email: Some(email.to_string()),
            order_id: Some(order_id.to_string()),
        };
        let response = self
            .client
            .get(self.url("/orders/lookup"))
            .query(&query)
            .send()
            .await?;
        Ok(Self::parse_optional::<OrderDetail<Order>>(response)
            .await?
            .map(|d| d.order))
    }
}
