//! Builds the cart update actions for an extension call.
//!
//! The builder decides which shipping method branch a cart falls into and
//! assembles the matching update actions. Checkout must never fail on an
//! upstream outage, so every error on the express path degrades to the
//! standard method.

use serde::Serialize;
use wallart_checkout_core::Money;

use crate::platform::{method_keys, Cart, UpdateAction};
use crate::pricing::cart_score;
use crate::services::ShippingService;

/// Destination countries express shipping serves, per store.
///
/// Express couriers are only contracted for these routes. Everything else
/// ships standard without asking the shipping info service.
const EXPRESS_COUNTRIES: &[(&str, &[&str])] = &[
    ("de", &["DE", "AT", "FR", "NL", "BE", "LU"]),
    ("ch", &["CH", "LI"]),
];

/// One entry of the `shippingMethods` custom field.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MethodOffer<'a> {
    key: &'a str,
    price: &'a Money,
}

/// Whether express couriers serve the route from a store to a country.
#[must_use]
pub fn express_supported(store_key: &str, country: &str) -> bool {
    EXPRESS_COUNTRIES
        .iter()
        .find(|(store, _)| *store == store_key)
        .is_some_and(|(_, countries)| countries.contains(&country))
}

/// Build the update actions for a cart.
///
/// Branches:
/// - no cart object: nothing to update
/// - only digital items: digital method, no rate input
/// - no items: standard method without rate input
/// - route without express service, or no address yet: standard method
///   with the cart score
/// - express route: offer both methods with prices, degrading to the
///   standard branch when any upstream lookup fails
pub async fn build_shipping_method_actions(
    cart: Option<&Cart>,
    shipping: &ShippingService,
) -> Vec<UpdateAction> {
    let Some(cart) = cart else {
        return Vec::new();
    };

    if !cart.line_items.is_empty() && cart.line_items.iter().all(|item| item.is_digital()) {
        return vec![
            UpdateAction::set_digital_method(),
            UpdateAction::reset_shipping_rate_input(),
            UpdateAction::reset_shipping_methods_field(),
            UpdateAction::recalculate(),
        ];
    }

    if cart.line_items.is_empty() {
        return vec![
            UpdateAction::set_standard_method(),
            UpdateAction::reset_shipping_methods_field(),
        ];
    }

    let score = cart_score(&cart.line_items);

    let supported = cart
        .shipping_address
        .as_ref()
        .is_some_and(|address| express_supported(&cart.store.key, &address.country));
    if !supported {
        return standard_with_score(score);
    }

    match express_offer(cart, score, shipping).await {
        Some(actions) => actions,
        None => standard_with_score(score),
    }
}

/// Standard method with the cart score set for tiered rates.
fn standard_with_score(score: u64) -> Vec<UpdateAction> {
    vec![
        UpdateAction::set_standard_method(),
        UpdateAction::set_cart_score_input(score),
        UpdateAction::reset_shipping_methods_field(),
        UpdateAction::recalculate(),
    ]
}

/// Price both methods and publish them on the custom field.
///
/// Returns `None` when express cannot be offered, for any reason; the
/// caller falls back to the standard branch.
async fn express_offer(
    cart: &Cart,
    score: u64,
    shipping: &ShippingService,
) -> Option<Vec<UpdateAction>> {
    let info = match shipping.poster_shipping_info(cart).await {
        Ok(info) => info,
        Err(error) => {
            tracing::warn!(%error, "Shipping info lookup failed, falling back to standard");
            return None;
        }
    };
    if !info.supports_express() {
        return None;
    }

    let standard_price = match shipping.standard_shipping_price(cart).await {
        Ok(price) => price,
        Err(error) => {
            tracing::warn!(%error, "Standard price lookup failed, falling back to standard");
            return None;
        }
    };
    let surcharge = match info.express_surcharge() {
        Ok(surcharge) => surcharge,
        Err(error) => {
            tracing::warn!(%error, "Express surcharge failed, falling back to standard");
            return None;
        }
    };

    let express_price = Money::cents(
        standard_price.cent_amount + surcharge.cent_amount,
        standard_price.currency_code.clone(),
    );
    let offers = serde_json::to_value([
        MethodOffer {
            key: method_keys::STANDARD,
            price: &standard_price,
        },
        MethodOffer {
            key: method_keys::EXPRESS,
            price: &express_price,
        },
    ])
    .ok()?;

    // Keep an already selected express method selected across updates.
    let selected_express = cart
        .shipping_info
        .as_ref()
        .is_some_and(|info| info.shipping_method_name == method_keys::EXPRESS);
    let method = if selected_express {
        UpdateAction::set_express_method()
    } else {
        UpdateAction::set_standard_method()
    };

    Some(vec![
        method,
        UpdateAction::set_shipping_methods_field(offers),
        UpdateAction::set_cart_score_input(score),
        UpdateAction::recalculate(),
    ])
}
