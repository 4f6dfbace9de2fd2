//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ExtensionConfig;
use crate::services::ShippingService;
use crate::shipping_info::{ShippingInfoClient, ShippingInfoError};
use crate::shipping_methods::{ShippingMethodsClient, ShippingMethodsError};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("shipping info client: {0}")]
    ShippingInfo(#[from] ShippingInfoError),
    #[error("shipping methods client: {0}")]
    ShippingMethods(#[from] ShippingMethodsError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the upstream clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ExtensionConfig,
    shipping: ShippingService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the upstream HTTP clients from the configuration and wires
    /// them into the shipping service.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to build.
    pub fn new(config: ExtensionConfig) -> Result<Self, StateError> {
        let info_client = ShippingInfoClient::new(&config.shipping_info)?;
        let methods_client = ShippingMethodsClient::new(&config.platform)?;
        let shipping = ShippingService::new(Arc::new(info_client), Arc::new(methods_client));

        Ok(Self {
            inner: Arc::new(AppStateInner { config, shipping }),
        })
    }

    /// Get a reference to the extension configuration.
    #[must_use]
    pub fn config(&self) -> &ExtensionConfig {
        &self.inner.config
    }

    /// Get a reference to the shipping service.
    #[must_use]
    pub fn shipping(&self) -> &ShippingService {
        &self.inner.shipping
    }
}
