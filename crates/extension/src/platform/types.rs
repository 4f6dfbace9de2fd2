//! Commerce platform wire types.
//!
//! Deserialization targets for the cart payload delivered by the platform
//! on every cart-update extension call, plus the shipping method shape
//! returned by the platform API. Only the fields the extension reads are
//! modelled; serde skips everything else in the payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wallart_checkout_core::Money;

/// Well-known product type identifiers.
pub mod product_type_ids {
    /// Product type for accessory items (hanging kits, care sets).
    ///
    /// Accessories ship alongside posters and never drive their own
    /// shipping info lookup.
    pub const ACCESSORIES: &str = "poster-accessories";
}

// ===== Extension call envelope =====

/// The body the platform sends to the extension endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionRequest {
    /// Trigger action, `Create` or `Update`.
    pub action: String,
    /// The resource the call is about.
    pub resource: ExtensionResource,
}

/// Resource reference inside an extension call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionResource {
    /// Resource type, `cart` for cart-update calls.
    pub type_id: String,
    /// The full cart object. Present on cart calls.
    #[serde(default)]
    pub obj: Option<Cart>,
}

// ===== Cart =====

/// A platform cart, reduced to the fields shipping logic needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Store the cart was created in. The store key doubles as the
    /// domain country for shipping routes.
    pub store: Store,
    /// Shipping address, if the customer has entered one yet.
    #[serde(default)]
    pub shipping_address: Option<Address>,
    /// Items in the cart.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Shipping info set on the cart, carries the selected method name.
    #[serde(default)]
    pub shipping_info: Option<CartShippingInfo>,
    /// Cart total. Used for the currency of the shipping price lookup.
    #[serde(default)]
    pub total_price: Option<Money>,
}

/// Store reference on a cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Store key, e.g. `"de"` or `"ch"`.
    pub key: String,
}

/// Shipping address, reduced to the country.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// Shipping info already present on the cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartShippingInfo {
    /// Name of the shipping method currently set on the cart.
    pub shipping_method_name: String,
}

// ===== Line items =====

/// A single cart line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Reference to the product type, used to recognize accessories.
    #[serde(default)]
    pub product_type: Option<ProductTypeReference>,
    /// Price of one unit.
    pub price: LineItemPrice,
    /// Quantity in the cart.
    pub quantity: u64,
    /// The ordered variant with its attributes.
    pub variant: Variant,
}

impl LineItem {
    /// A digital item carries no variant attributes at all.
    #[must_use]
    pub fn is_digital(&self) -> bool {
        self.variant.attributes.is_empty()
    }

    /// Whether this item belongs to the accessories product type.
    #[must_use]
    pub fn is_accessory(&self) -> bool {
        self.product_type
            .as_ref()
            .is_some_and(|reference| reference.id == product_type_ids::ACCESSORIES)
    }
}

/// Product type reference on a line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeReference {
    /// Product type identifier.
    pub id: String,
}

/// Price of a line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPrice {
    /// The money value of the price.
    pub value: Money,
}

/// Product variant on a line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant attributes, e.g. material, width, height.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Variant {
    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }
}

/// A variant attribute with an untyped value.
///
/// The platform delivers attribute values as arbitrary JSON; accessors
/// coerce into the type the caller needs and return `None` on mismatch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value as raw JSON.
    pub value: serde_json::Value,
}

impl Attribute {
    /// The value as a decimal, if it is a JSON number.
    ///
    /// Goes through the string representation so fractional values keep
    /// their exact decimal digits instead of a float approximation.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match &self.value {
            serde_json::Value::Number(number) => number.to_string().parse().ok(),
            _ => None,
        }
    }

    /// The value as an unsigned integer, if it is one.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.value.as_u64()
    }

    /// The value as a string slice, if it is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

// ===== Shipping methods =====

/// A platform shipping method with its zone rates expanded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    /// Method key, e.g. `standard-shipping`.
    pub key: String,
    /// Prices per shipping zone.
    #[serde(default)]
    pub zone_rates: Vec<ZoneRate>,
}

impl ShippingMethod {
    /// Find the zone rate whose zone covers the given country.
    #[must_use]
    pub fn zone_rate_for_country(&self, country: &str) -> Option<&ZoneRate> {
        self.zone_rates.iter().find(|rate| rate.covers(country))
    }
}

/// Shipping rates for one zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRate {
    /// Reference to the zone, expanded to include its locations.
    pub zone: ZoneReference,
    /// One rate per currency.
    #[serde(default)]
    pub shipping_rates: Vec<ShippingRate>,
}

impl ZoneRate {
    /// Whether the expanded zone contains the given country.
    #[must_use]
    pub fn covers(&self, country: &str) -> bool {
        self.zone
            .obj
            .as_ref()
            .is_some_and(|zone| zone.locations.iter().any(|location| location.country == country))
    }
}

/// Expandable reference to a zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReference {
    /// The expanded zone object. Only present when the query asked for
    /// `expand=zoneRates[*].zone`.
    #[serde(default)]
    pub obj: Option<Zone>,
}

/// A shipping zone, a set of countries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Countries belonging to this zone.
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// A single country within a zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// A price entry inside a zone rate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRate {
    /// The shipping price in this rate's currency.
    pub price: Money,
}

/// The response body the extension returns to the platform.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionResponse {
    /// Update actions the platform applies to the cart.
    pub actions: Vec<super::actions::UpdateAction>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn line_item_json(attributes: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "productType": { "id": "posters" },
            "price": { "value": { "centAmount": 2999, "currencyCode": "EUR" } },
            "quantity": 1,
            "variant": { "attributes": attributes }
        })
    }

    #[test]
    fn test_deserializes_cart_with_minimal_fields() {
        let cart: Cart = serde_json::from_value(serde_json::json!({
            "store": { "key": "de" }
        }))
        .unwrap();
        assert_eq!(cart.store.key, "de");
        assert!(cart.shipping_address.is_none());
        assert!(cart.line_items.is_empty());
        assert!(cart.shipping_info.is_none());
        assert!(cart.total_price.is_none());
    }

    #[test]
    fn test_digital_item_has_no_attributes() {
        let item: LineItem = serde_json::from_value(line_item_json(serde_json::json!([]))).unwrap();
        assert!(item.is_digital());
        assert!(!item.is_accessory());
    }

    #[test]
    fn test_accessory_item_by_product_type() {
        let mut json = line_item_json(serde_json::json!([
            { "name": "kind", "value": "hanging-kit" }
        ]));
        json["productType"]["id"] = serde_json::json!(product_type_ids::ACCESSORIES);
        let item: LineItem = serde_json::from_value(json).unwrap();
        assert!(item.is_accessory());
        assert!(!item.is_digital());
    }

    #[test]
    fn test_attribute_accessors() {
        let item: LineItem = serde_json::from_value(line_item_json(serde_json::json!([
            { "name": "material", "value": "material-poster" },
            { "name": "width", "value": 3000 },
            { "name": "shipping_score", "value": 0.1 }
        ])))
        .unwrap();
        let variant = &item.variant;
        assert_eq!(
            variant.attribute("material").unwrap().as_str(),
            Some("material-poster")
        );
        assert_eq!(variant.attribute("width").unwrap().as_u64(), Some(3000));
        assert_eq!(
            variant.attribute("shipping_score").unwrap().as_decimal(),
            Some("0.1".parse().unwrap())
        );
        assert!(variant.attribute("missing").is_none());
    }

    #[test]
    fn test_zone_rate_covers_expanded_countries() {
        let method: ShippingMethod = serde_json::from_value(serde_json::json!({
            "key": "standard-shipping",
            "zoneRates": [
                {
                    "zone": { "obj": { "locations": [ { "country": "DE" }, { "country": "AT" } ] } },
                    "shippingRates": [ { "price": { "centAmount": 399, "currencyCode": "EUR" } } ]
                },
                {
                    "zone": {},
                    "shippingRates": []
                }
            ]
        }))
        .unwrap();
        assert!(method.zone_rate_for_country("AT").is_some());
        assert!(method.zone_rate_for_country("US").is_none());
        assert!(!method.zone_rates[1].covers("DE"));
    }
}
