//! Client for the commerce platform shipping methods API.
//!
//! Fetches shipping methods by key with their zone rates expanded, so the
//! pricing logic can resolve the standard shipping price for a country and
//! currency without further lookups.
//!
//! - Authentication: Bearer token via `Authorization` header
//! - Lookup: `GET /{projectKey}/shipping-methods/key={key}`

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;

use crate::config::PlatformConfig;
use crate::platform::{method_keys, ShippingMethod};

/// Expansion expression resolving zone references into full zone objects.
const ZONE_EXPAND: &str = "zoneRates[*].zone";

/// Errors that can occur when interacting with the shipping methods API.
#[derive(Debug, Error)]
pub enum ShippingMethodsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unauthorized (invalid API token).
    #[error("Unauthorized: invalid API token")]
    Unauthorized,
}

/// Lookup interface for platform shipping methods.
///
/// The service layer depends on this trait so tests can substitute the
/// HTTP client with an in-memory fake.
#[async_trait]
pub trait ShippingMethodsApi: Send + Sync {
    /// Fetch the standard shipping method with zone rates expanded.
    async fn standard_shipping(&self) -> Result<ShippingMethod, ShippingMethodsError>;
}

/// Platform shipping methods API client.
#[derive(Clone)]
pub struct ShippingMethodsClient {
    inner: Arc<ShippingMethodsClientInner>,
}

struct ShippingMethodsClientInner {
    client: reqwest::Client,
    base_url: String,
    project_key: String,
}

impl ShippingMethodsClient {
    /// Create a new shipping methods client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PlatformConfig) -> Result<Self, ShippingMethodsError> {
        let mut headers = HeaderMap::new();

        // Authorization header
        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ShippingMethodsError::Parse(format!("Invalid API token format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ShippingMethodsClientInner {
                client,
                base_url: config.base_url.clone(),
                project_key: config.project_key.clone(),
            }),
        })
    }

    /// Fetch a shipping method by key with zone rates expanded.
    async fn by_key(&self, key: &str) -> Result<ShippingMethod, ShippingMethodsError> {
        let url = format!(
            "{}/{}/shipping-methods/key={key}",
            self.inner.base_url, self.inner.project_key
        );
        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("expand", ZONE_EXPAND)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ShippingMethodsError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ShippingMethodsError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse error response from the platform API.
    async fn parse_error(response: reqwest::Response) -> ShippingMethodsError {
        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return ShippingMethodsError::Unauthorized;
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        ShippingMethodsError::Api { status, message }
    }
}

#[async_trait]
impl ShippingMethodsApi for ShippingMethodsClient {
    #[instrument(skip(self))]
    async fn standard_shipping(&self) -> Result<ShippingMethod, ShippingMethodsError> {
        let method = self.by_key(method_keys::STANDARD).await?;
        tracing::debug!(key = %method.key, zones = method.zone_rates.len(), "Fetched shipping method");
        Ok(method)
    }
}
