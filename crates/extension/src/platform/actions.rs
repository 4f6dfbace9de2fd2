//! Cart update actions returned to the platform.
//!
//! Each variant serializes to the platform's update action JSON, tagged by
//! the `action` field. Constructors cover exactly the actions the builder
//! emits.

use serde::{Deserialize, Serialize};

/// Keys of the shipping methods configured on the platform project.
pub mod method_keys {
    /// Parcel shipping, always available.
    pub const STANDARD: &str = "standard-shipping";
    /// Courier shipping, offered when every item has a complete express
    /// rule for the route.
    pub const EXPRESS: &str = "express-shipping";
    /// Free method for carts containing only digital items.
    pub const DIGITAL: &str = "digital-shipping";
}

/// Name of the cart custom field holding the offered methods and prices.
pub const SHIPPING_METHODS_FIELD: &str = "shippingMethods";

/// A cart update action in platform JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum UpdateAction {
    /// Select a shipping method by key.
    #[serde(rename_all = "camelCase")]
    SetShippingMethod {
        shipping_method: ShippingMethodResourceIdentifier,
    },
    /// Set or clear the cart score used for tiered rate selection.
    #[serde(rename_all = "camelCase")]
    SetShippingRateInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        shipping_rate_input_type: Option<ShippingRateInputType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        shipping_rate_input: Option<ShippingRateInput>,
    },
    /// Set or clear a custom field on the cart.
    #[serde(rename_all = "camelCase")]
    SetCustomField {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<serde_json::Value>,
    },
    /// Ask the platform to recalculate cart totals.
    Recalculate,
}

/// Resource identifier for a shipping method, by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethodResourceIdentifier {
    /// Always `shipping-method`.
    pub type_id: String,
    /// Key of the shipping method on the project.
    pub key: String,
}

/// The project-level rate input type, scored carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShippingRateInputType {
    /// Score-based rate selection.
    CartScore {
        /// Total shipping score of the cart.
        score: u64,
    },
}

/// The rate input set on the individual cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShippingRateInput {
    /// Score-based rate selection.
    Score {
        /// Total shipping score of the cart.
        score: u64,
    },
}

impl UpdateAction {
    fn set_method(key: &str) -> Self {
        Self::SetShippingMethod {
            shipping_method: ShippingMethodResourceIdentifier {
                type_id: "shipping-method".to_owned(),
                key: key.to_owned(),
            },
        }
    }

    /// Select the digital shipping method.
    #[must_use]
    pub fn set_digital_method() -> Self {
        Self::set_method(method_keys::DIGITAL)
    }

    /// Select the standard shipping method.
    #[must_use]
    pub fn set_standard_method() -> Self {
        Self::set_method(method_keys::STANDARD)
    }

    /// Select the express shipping method.
    #[must_use]
    pub fn set_express_method() -> Self {
        Self::set_method(method_keys::EXPRESS)
    }

    /// Clear the shipping rate input from the cart.
    #[must_use]
    pub const fn reset_shipping_rate_input() -> Self {
        Self::SetShippingRateInput {
            shipping_rate_input_type: None,
            shipping_rate_input: None,
        }
    }

    /// Set the cart score for tiered rate selection.
    #[must_use]
    pub const fn set_cart_score_input(score: u64) -> Self {
        Self::SetShippingRateInput {
            shipping_rate_input_type: Some(ShippingRateInputType::CartScore { score }),
            shipping_rate_input: Some(ShippingRateInput::Score { score }),
        }
    }

    /// Clear the offered methods custom field.
    #[must_use]
    pub fn reset_shipping_methods_field() -> Self {
        Self::SetCustomField {
            name: SHIPPING_METHODS_FIELD.to_owned(),
            value: None,
        }
    }

    /// Publish the offered methods and prices on the custom field.
    #[must_use]
    pub fn set_shipping_methods_field(value: serde_json::Value) -> Self {
        Self::SetCustomField {
            name: SHIPPING_METHODS_FIELD.to_owned(),
            value: Some(value),
        }
    }

    /// Recalculate cart totals.
    #[must_use]
    pub const fn recalculate() -> Self {
        Self::Recalculate
    }
}
