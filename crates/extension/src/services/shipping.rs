//! Shipping orchestration over the upstream APIs.
//!
//! Collects shipping records for every physical item in a cart, decides
//! whether express shipping can be offered, and prices both methods.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;
use wallart_checkout_core::{max_price, Money};

use crate::platform::{Cart, LineItem};
use crate::pricing::{
    calculate_express_surcharge, calculate_standard_shipping_price, PricingError,
};
use crate::shipping_info::{
    ProductInfoRequest, ProductShippingRecord, ShippingInfoApi, ShippingInfoError, ShippingRoute,
};
use crate::shipping_methods::{ShippingMethodsApi, ShippingMethodsError};

/// Variant attribute naming the product material.
const MATERIAL_ATTRIBUTE: &str = "material";
/// Variant attribute with the print width in millimeters.
const WIDTH_ATTRIBUTE: &str = "width";
/// Variant attribute with the print height in millimeters.
const HEIGHT_ATTRIBUTE: &str = "height";

/// Errors from the shipping service.
#[derive(Debug, Error)]
pub enum ShippingServiceError {
    /// Shipping info lookup failed.
    #[error("Shipping info error: {0}")]
    Info(#[from] ShippingInfoError),

    /// Shipping method lookup failed.
    #[error("Shipping methods error: {0}")]
    Methods(#[from] ShippingMethodsError),

    /// Price calculation failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The cart has no shipping address yet.
    #[error("Cart has no shipping address")]
    MissingShippingAddress,
}

/// Shipping orchestration service.
///
/// Holds the upstream API handles behind trait objects so tests can
/// substitute in-memory fakes.
#[derive(Clone)]
pub struct ShippingService {
    info_api: Arc<dyn ShippingInfoApi>,
    methods_api: Arc<dyn ShippingMethodsApi>,
}

/// Shipping records collected for the physical items of a cart.
#[derive(Debug, Clone)]
pub struct PosterShippingInfo {
    line_items: Vec<LineItem>,
    records: Vec<ProductShippingRecord>,
    unresolved: usize,
}

impl PosterShippingInfo {
    /// Info for a cart without any line items.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            line_items: Vec::new(),
            records: Vec::new(),
            unresolved: 0,
        }
    }

    /// Whether express shipping can be offered for this cart.
    ///
    /// Every item must have resolved to a record and every record must
    /// carry a complete express rule.
    #[must_use]
    pub fn supports_express(&self) -> bool {
        !self.line_items.is_empty()
            && self.unresolved == 0
            && !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|record| record.express.as_ref().is_some_and(|rule| rule.is_complete()))
    }

    /// The express surcharge for the cart.
    ///
    /// Each record prices the whole cart under its own rule; the most
    /// expensive rule wins so the surcharge covers every item.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::ExpressUnsupported` when express shipping is
    /// not available for this cart.
    pub fn express_surcharge(&self) -> Result<Money, PricingError> {
        if !self.supports_express() {
            return Err(PricingError::ExpressUnsupported);
        }

        let mut surcharges = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let Some(rule) = record.express.as_ref() else {
                return Err(PricingError::ExpressUnsupported);
            };
            surcharges.push(calculate_express_surcharge(&self.line_items, rule)?);
        }

        max_price(&surcharges)
            .cloned()
            .ok_or(PricingError::ExpressUnsupported)
    }
}

impl ShippingService {
    /// Create a new shipping service over the given API handles.
    pub fn new(
        info_api: Arc<dyn ShippingInfoApi>,
        methods_api: Arc<dyn ShippingMethodsApi>,
    ) -> Self {
        Self {
            info_api,
            methods_api,
        }
    }

    /// Collect shipping records for every physical item in the cart.
    ///
    /// Digital items and accessories do not drive their own lookup; one
    /// shared accessory record is fetched per cart instead. Items whose
    /// variant lacks material or size attributes count as unresolved and
    /// disable express shipping.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart has no shipping address or an
    /// upstream lookup fails.
    #[instrument(skip(self, cart), fields(line_items = cart.line_items.len()))]
    pub async fn poster_shipping_info(
        &self,
        cart: &Cart,
    ) -> Result<PosterShippingInfo, ShippingServiceError> {
        if cart.line_items.is_empty() {
            return Ok(PosterShippingInfo::empty());
        }

        let route = Self::route(cart)?;

        let mut records = Vec::new();
        let mut unresolved = 0;
        for item in &cart.line_items {
            if item.is_digital() || item.is_accessory() {
                continue;
            }
            match Self::info_request(item) {
                Some(request) => {
                    records.push(self.info_api.info(&request, &route).await?);
                }
                None => unresolved += 1,
            }
        }

        // Accessories share one record per cart regardless of count.
        records.push(self.info_api.accessory(&route).await?);

        Ok(PosterShippingInfo {
            line_items: cart.line_items.clone(),
            records,
            unresolved,
        })
    }

    /// Price the standard shipping method for the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the method lookup fails or no rate matches
    /// the cart's country and currency.
    #[instrument(skip(self, cart))]
    pub async fn standard_shipping_price(
        &self,
        cart: &Cart,
    ) -> Result<Money, ShippingServiceError> {
        let method = self.methods_api.standard_shipping().await?;
        Ok(calculate_standard_shipping_price(cart, &method)?)
    }

    fn route(cart: &Cart) -> Result<ShippingRoute, ShippingServiceError> {
        let shipping_country = cart
            .shipping_address
            .as_ref()
            .map(|address| address.country.clone())
            .ok_or(ShippingServiceError::MissingShippingAddress)?;
        Ok(ShippingRoute {
            shipping_country,
            domain_country: cart.store.key.to_uppercase(),
        })
    }

    fn info_request(item: &LineItem) -> Option<ProductInfoRequest> {
        let variant = &item.variant;
        Some(ProductInfoRequest {
            id: variant.attribute(MATERIAL_ATTRIBUTE)?.as_str()?.to_string(),
            width: variant.attribute(WIDTH_ATTRIBUTE)?.as_u64()?,
            height: variant.attribute(HEIGHT_ATTRIBUTE)?.as_u64()?,
        })
    }
}
