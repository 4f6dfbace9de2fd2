//! Cent-precision money as used on the platform wire format.
//!
//! The commerce platform transmits all amounts as integer minor units
//! (cents) with an ISO 4217 currency code. Amounts never carry fractional
//! cents, so the representation is exact and arithmetic stays in integers.

use serde::{Deserialize, Serialize};

/// Discriminant for the platform money representation.
///
/// The platform tags every money payload with `"type": "centPrecision"`.
/// High-precision money (fractional cents) is not used by the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoneyType {
    #[default]
    #[serde(rename = "centPrecision")]
    CentPrecision,
}

/// A monetary amount in integer minor units.
///
/// Mirrors the platform's `TypedMoney` shape: the amount is given in the
/// smallest unit of the currency (cents for EUR/CHF), together with the
/// ISO 4217 currency code and the number of fraction digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Payload discriminant, always `centPrecision`.
    #[serde(rename = "type", default)]
    pub kind: MoneyType,
    /// Amount in minor units (e.g. cents).
    pub cent_amount: u64,
    /// ISO 4217 currency code (e.g. "EUR", "CHF").
    pub currency_code: String,
    /// Number of digits after the decimal separator.
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: u32,
}

const fn default_fraction_digits() -> u32 {
    2
}

impl Money {
    /// Create a cent-precision amount with two fraction digits.
    #[must_use]
    pub fn cents(cent_amount: u64, currency_code: impl Into<String>) -> Self {
        Self {
            kind: MoneyType::CentPrecision,
            cent_amount,
            currency_code: currency_code.into(),
            fraction_digits: 2,
        }
    }
}

/// Pick the largest amount from a set of prices.
///
/// Returns `None` for an empty set. Currencies are not compared; callers
/// are expected to pass prices of a single currency.
pub fn max_price<'a, I>(prices: I) -> Option<&'a Money>
where
    I: IntoIterator<Item = &'a Money>,
{
    prices.into_iter().max_by_key(|money| money.cent_amount)
}
