//! Request and response types for the shipping info service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies the product whose shipping record is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfoRequest {
    /// Material identifier, e.g. `material-poster`.
    pub id: String,
    /// Print width in millimeters.
    pub width: u64,
    /// Print height in millimeters.
    pub height: u64,
}

/// The shipping route of a cart.
///
/// `shipping_country` is where the parcel goes, `domain_country` the store
/// the cart was created in. Rules differ per route, e.g. DE to CH parcels
/// clear customs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingRoute {
    /// Destination country, ISO 3166-1 alpha-2.
    pub shipping_country: String,
    /// Store country, ISO 3166-1 alpha-2.
    pub domain_country: String,
}

/// Shipping record for one product on one route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductShippingRecord {
    /// Express courier rule, absent when the product cannot ship express
    /// on this route.
    #[serde(default)]
    pub express: Option<ExpressRule>,
}

/// Express surcharge rule for a product and route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRule {
    /// Minimum surcharge in minor units.
    #[serde(default)]
    pub express_minimum: Option<u64>,
    /// Percentage of the cart item subtotal, e.g. `25` for 25 percent.
    #[serde(default)]
    pub express_percentage: Option<Decimal>,
    /// ISO 4217 currency the rule prices in.
    pub currency: String,
}

impl ExpressRule {
    /// A rule can only be priced when both minimum and percentage are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.express_minimum.is_some() && self.express_percentage.is_some()
    }
}
