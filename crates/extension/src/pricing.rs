//! Shipping price and surcharge arithmetic.
//!
//! Pure functions over cart line items, shipping methods and express
//! rules. All amounts stay in integer minor units; percentages and
//! fractional scores go through `Decimal` and round outward only at the
//! final step.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
use wallart_checkout_core::Money;

use crate::platform::{Cart, LineItem, ShippingMethod, ShippingRate, ZoneRate};
use crate::shipping_info::ExpressRule;

/// Variant attribute holding the per-item shipping score.
const SHIPPING_SCORE_ATTRIBUTE: &str = "shipping_score";

/// Errors from shipping price calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An express rule is missing a required field.
    #[error("Express rule is missing {0}")]
    MissingRule(&'static str),

    /// The cart has no shipping address yet.
    #[error("Cart has no shipping address")]
    MissingShippingAddress,

    /// The cart has no total price to take the currency from.
    #[error("Cart has no total price")]
    MissingTotalPrice,

    /// No shipping zone covers the destination country.
    #[error("No shipping zone covers country {0}")]
    NoZoneForCountry(String),

    /// The zone has no rate in the cart currency.
    #[error("No shipping rate for currency {0}")]
    NoRateForCurrency(String),

    /// Express shipping is not available for this cart.
    #[error("Express shipping is not supported for this cart")]
    ExpressUnsupported,

    /// An intermediate amount left the representable range.
    #[error("Amount out of range")]
    AmountOutOfRange,
}

/// Calculate the express surcharge for a cart under one rule.
///
/// The surcharge is the percentage of the item subtotal, rounded down to
/// whole minor units, but never less than the rule minimum.
///
/// # Errors
///
/// Returns `PricingError::MissingRule` when the rule lacks its minimum or
/// percentage.
pub fn calculate_express_surcharge(
    line_items: &[LineItem],
    rule: &ExpressRule,
) -> Result<Money, PricingError> {
    let minimum = rule
        .express_minimum
        .ok_or(PricingError::MissingRule("expressMinimum"))?;
    let percentage = rule
        .express_percentage
        .ok_or(PricingError::MissingRule("expressPercentage"))?;

    let subtotal: u64 = line_items
        .iter()
        .map(|item| item.price.value.cent_amount * item.quantity)
        .sum();

    let percentage_amount = (Decimal::from(subtotal) * percentage / Decimal::ONE_HUNDRED)
        .floor()
        .to_u64()
        .ok_or(PricingError::AmountOutOfRange)?;

    Ok(Money::cents(
        percentage_amount.max(minimum),
        rule.currency.clone(),
    ))
}

/// Resolve the standard shipping price for a cart from a shipping method.
///
/// Finds the zone rate covering the cart's destination country and picks
/// the rate priced in the cart currency.
///
/// # Errors
///
/// Returns an error when the cart lacks an address or total price, or when
/// the method has no matching zone or currency rate.
pub fn calculate_standard_shipping_price(
    cart: &Cart,
    method: &ShippingMethod,
) -> Result<Money, PricingError> {
    let country = cart
        .shipping_address
        .as_ref()
        .map(|address| address.country.as_str())
        .ok_or(PricingError::MissingShippingAddress)?;
    let currency = cart
        .total_price
        .as_ref()
        .map(|total| total.currency_code.as_str())
        .ok_or(PricingError::MissingTotalPrice)?;

    let zone_rate = method
        .zone_rate_for_country(country)
        .ok_or_else(|| PricingError::NoZoneForCountry(country.to_string()))?;
    let rate = shipping_rate_by_currency(zone_rate, currency)
        .ok_or_else(|| PricingError::NoRateForCurrency(currency.to_string()))?;

    Ok(rate.price.clone())
}

/// Pick the rate priced in the given currency out of a zone rate.
#[must_use]
pub fn shipping_rate_by_currency<'a>(
    zone_rate: &'a ZoneRate,
    currency: &str,
) -> Option<&'a ShippingRate> {
    zone_rate
        .shipping_rates
        .iter()
        .find(|rate| rate.price.currency_code == currency)
}

/// Total shipping score of a cart.
///
/// Each item contributes its `shipping_score` attribute divided by 100 and
/// rounded up, so any positive fractional score still counts as one.
/// Items without the attribute contribute nothing.
#[must_use]
pub fn cart_score(line_items: &[LineItem]) -> u64 {
    line_items
        .iter()
        .map(|item| {
            item.variant
                .attribute(SHIPPING_SCORE_ATTRIBUTE)
                .and_then(|attribute| attribute.as_decimal())
                .and_then(|score| (score / Decimal::ONE_HUNDRED).ceil().to_u64())
                .unwrap_or(0)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn rule(minimum: Option<u64>, percentage: Option<&str>) -> ExpressRule {
        ExpressRule {
            express_minimum: minimum,
            express_percentage: percentage.map(|p| p.parse().unwrap()),
            currency: "EUR".to_string(),
        }
    }

    fn item(cent_amount: u64, quantity: u64, attributes: serde_json::Value) -> LineItem {
        serde_json::from_value(serde_json::json!({
            "price": { "value": { "centAmount": cent_amount, "currencyCode": "EUR" } },
            "quantity": quantity,
            "variant": { "attributes": attributes }
        }))
        .unwrap()
    }

    fn standard_method() -> ShippingMethod {
        serde_json::from_value(serde_json::json!({
            "key": "standard-shipping",
            "zoneRates": [
                {
                    "zone": { "obj": { "locations": [ { "country": "DE" }, { "country": "AT" } ] } },
                    "shippingRates": [
                        { "price": { "centAmount": 399, "currencyCode": "EUR" } },
                        { "price": { "centAmount": 395, "currencyCode": "GBP" } }
                    ]
                },
                {
                    "zone": { "obj": { "locations": [ { "country": "FR" } ] } },
                    "shippingRates": [
                        { "price": { "centAmount": 999, "currencyCode": "EUR" } }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    fn cart(country: Option<&str>, currency: Option<&str>) -> Cart {
        let mut json = serde_json::json!({ "store": { "key": "de" } });
        if let Some(country) = country {
            json["shippingAddress"] = serde_json::json!({ "country": country });
        }
        if let Some(currency) = currency {
            json["totalPrice"] = serde_json::json!({ "centAmount": 9999, "currencyCode": currency });
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_surcharge_minimum_wins_over_percentage() {
        // 20% of 5000 = 1000, below the minimum of 2499
        let items = vec![item(5000, 1, serde_json::json!([]))];
        let surcharge = calculate_express_surcharge(&items, &rule(Some(2499), Some("20"))).unwrap();
        assert_eq!(surcharge, Money::cents(2499, "EUR"));
    }

    #[test]
    fn test_surcharge_percentage_rounds_down_to_minimum() {
        // 25% of 9999 = 2499.75, floored to 2499 which equals the minimum
        let items = vec![item(9999, 1, serde_json::json!([]))];
        let surcharge = calculate_express_surcharge(&items, &rule(Some(2499), Some("25"))).unwrap();
        assert_eq!(surcharge.cent_amount, 2499);
    }

    #[test]
    fn test_surcharge_percentage_wins_over_minimum() {
        // 25% of 19999 = 4999.75, floored to 4999, above the minimum
        let items = vec![item(19999, 1, serde_json::json!([]))];
        let surcharge = calculate_express_surcharge(&items, &rule(Some(2499), Some("25"))).unwrap();
        assert_eq!(surcharge.cent_amount, 4999);
    }

    #[test]
    fn test_surcharge_respects_quantity() {
        // 2 * 9999 = 19998, 25% = 4999.5 floored to 4999
        let items = vec![item(9999, 2, serde_json::json!([]))];
        let surcharge = calculate_express_surcharge(&items, &rule(Some(2499), Some("25"))).unwrap();
        assert_eq!(surcharge.cent_amount, 4999);
    }

    #[test]
    fn test_surcharge_zero_minimum() {
        let items = vec![item(1200, 1, serde_json::json!([]))];
        let surcharge = calculate_express_surcharge(&items, &rule(Some(0), Some("25"))).unwrap();
        assert_eq!(surcharge.cent_amount, 300);
    }

    #[test]
    fn test_surcharge_zero_percentage_falls_back_to_minimum() {
        let items = vec![item(9999, 1, serde_json::json!([]))];
        let surcharge = calculate_express_surcharge(&items, &rule(Some(2499), Some("0"))).unwrap();
        assert_eq!(surcharge.cent_amount, 2499);
    }

    #[test]
    fn test_surcharge_zero_minimum_and_percentage() {
        let items = vec![item(9999, 1, serde_json::json!([]))];
        let surcharge = calculate_express_surcharge(&items, &rule(Some(0), Some("0"))).unwrap();
        assert_eq!(surcharge.cent_amount, 0);
    }

    #[test]
    fn test_surcharge_missing_minimum_is_error() {
        let items = vec![item(9999, 1, serde_json::json!([]))];
        let err = calculate_express_surcharge(&items, &rule(None, Some("25"))).unwrap_err();
        assert_eq!(err, PricingError::MissingRule("expressMinimum"));
    }

    #[test]
    fn test_surcharge_missing_percentage_is_error() {
        let items = vec![item(9999, 1, serde_json::json!([]))];
        let err = calculate_express_surcharge(&items, &rule(Some(2499), None)).unwrap_err();
        assert_eq!(err, PricingError::MissingRule("expressPercentage"));
    }

    #[test]
    fn test_standard_price_for_covered_country() {
        let price =
            calculate_standard_shipping_price(&cart(Some("FR"), Some("EUR")), &standard_method())
                .unwrap();
        assert_eq!(price, Money::cents(999, "EUR"));
    }

    #[test]
    fn test_standard_price_picks_cart_currency() {
        let price =
            calculate_standard_shipping_price(&cart(Some("DE"), Some("GBP")), &standard_method())
                .unwrap();
        assert_eq!(price, Money::cents(395, "GBP"));
    }

    #[test]
    fn test_standard_price_uncovered_country() {
        let err =
            calculate_standard_shipping_price(&cart(Some("US"), Some("EUR")), &standard_method())
                .unwrap_err();
        assert_eq!(err, PricingError::NoZoneForCountry("US".to_string()));
    }

    #[test]
    fn test_standard_price_unknown_currency() {
        let err =
            calculate_standard_shipping_price(&cart(Some("DE"), Some("DKK")), &standard_method())
                .unwrap_err();
        assert_eq!(err, PricingError::NoRateForCurrency("DKK".to_string()));
    }

    #[test]
    fn test_standard_price_requires_address_and_total() {
        let err = calculate_standard_shipping_price(&cart(None, Some("EUR")), &standard_method())
            .unwrap_err();
        assert_eq!(err, PricingError::MissingShippingAddress);

        let err = calculate_standard_shipping_price(&cart(Some("DE"), None), &standard_method())
            .unwrap_err();
        assert_eq!(err, PricingError::MissingTotalPrice);
    }

    #[test]
    fn test_cart_score_rounds_each_item_up() {
        // 250 / 100 = 2.5 rounds to 3, 0.1 / 100 rounds to 1
        let items = vec![
            item(2999, 1, serde_json::json!([{ "name": "shipping_score", "value": 250 }])),
            item(399, 1, serde_json::json!([{ "name": "shipping_score", "value": 0.1 }])),
        ];
        assert_eq!(cart_score(&items), 4);
    }

    #[test]
    fn test_cart_score_ignores_items_without_score() {
        let items = vec![
            item(2999, 1, serde_json::json!([{ "name": "material", "value": "material-poster" }])),
            item(399, 1, serde_json::json!([])),
        ];
        assert_eq!(cart_score(&items), 0);
    }
}
