//! Wallart Checkout Core - Shared types library.
//!
//! This crate provides common types used across the Wallart checkout
//! components:
//! - `extension` - Cart-update API extension for the commerce platform
//! - `integration-tests` - End-to-end tests against a running extension
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Money in cent precision and aggregation helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
