//! Client for the shipping info service.
//!
//! The shipping info service knows, per product material, size and route,
//! which carriers apply and what express shipping costs. The extension
//! asks it for one record per physical line item plus one record for the
//! accessory bundle.
//!
//! - Authentication: Bearer token via `Authorization` header
//! - Record lookup: `GET /shipping-info/{id}` with size and route query
//! - Accessory lookup: `GET /shipping-info/accessory` with route query

mod types;

pub use types::*;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;

use crate::config::ShippingInfoConfig;

/// Errors that can occur when interacting with the shipping info service.
#[derive(Debug, Error)]
pub enum ShippingInfoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unauthorized (invalid API key).
    #[error("Unauthorized: invalid API key")]
    Unauthorized,
}

/// Lookup interface for product shipping records.
///
/// The service layer depends on this trait so tests can substitute the
/// HTTP client with an in-memory fake.
#[async_trait]
pub trait ShippingInfoApi: Send + Sync {
    /// Fetch the shipping record for one product on a route.
    async fn info(
        &self,
        request: &ProductInfoRequest,
        route: &ShippingRoute,
    ) -> Result<ProductShippingRecord, ShippingInfoError>;

    /// Fetch the shipping record for the accessory bundle on a route.
    async fn accessory(&self, route: &ShippingRoute)
        -> Result<ProductShippingRecord, ShippingInfoError>;
}

/// Shipping info service client.
#[derive(Clone)]
pub struct ShippingInfoClient {
    inner: Arc<ShippingInfoClientInner>,
}

struct ShippingInfoClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ShippingInfoClient {
    /// Create a new shipping info client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ShippingInfoConfig) -> Result<Self, ShippingInfoError> {
        let mut headers = HeaderMap::new();

        // Authorization header
        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ShippingInfoError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ShippingInfoClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Execute a GET request against the shipping info service.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ShippingInfoError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).query(query).send().await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ShippingInfoError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ShippingInfoError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse error response from the shipping info service.
    async fn parse_error(response: reqwest::Response) -> ShippingInfoError {
        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return ShippingInfoError::Unauthorized;
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        ShippingInfoError::Api { status, message }
    }
}

#[async_trait]
impl ShippingInfoApi for ShippingInfoClient {
    #[instrument(skip(self), fields(id = %request.id, country = %route.shipping_country))]
    async fn info(
        &self,
        request: &ProductInfoRequest,
        route: &ShippingRoute,
    ) -> Result<ProductShippingRecord, ShippingInfoError> {
        self.get(
            &format!("/shipping-info/{}", request.id),
            &[
                ("width", request.width.to_string()),
                ("height", request.height.to_string()),
                ("shippingCountry", route.shipping_country.clone()),
                ("domainCountry", route.domain_country.clone()),
            ],
        )
        .await
    }

    #[instrument(skip(self), fields(country = %route.shipping_country))]
    async fn accessory(
        &self,
        route: &ShippingRoute,
    ) -> Result<ProductShippingRecord, ShippingInfoError> {
        self.get(
            "/shipping-info/accessory",
            &[
                ("shippingCountry", route.shipping_country.clone()),
                ("domainCountry", route.domain_country.clone()),
            ],
        )
        .await
    }
}
