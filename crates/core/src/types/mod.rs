//! Core types for Wallart Checkout.
//!
//! This module provides the shared money representation used on the
//! platform wire format.

pub mod money;

pub use money::{max_price, Money, MoneyType};
