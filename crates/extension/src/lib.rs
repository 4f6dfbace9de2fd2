//! Wallart Checkout Extension - Cart-update API extension.
//!
//! This service receives cart-update extension calls from the commerce
//! platform, determines which shipping method applies to the cart and at
//! what price, and answers with platform update actions.
//!
//! # Architecture
//!
//! - [`routes`] - HTTP surface (`POST /extension`)
//! - [`builder`] - turns a cart into a list of update actions
//! - [`services`] - orchestration over the upstream APIs
//! - [`pricing`] - pure shipping price and surcharge arithmetic
//! - [`platform`] - commerce platform wire types and update actions
//! - [`shipping_info`] - client for the shipping info service
//! - [`shipping_methods`] - client for the platform shipping methods API
//!
//! The handler never fails a checkout because an upstream was down: any
//! upstream error degrades to the standard shipping method.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod builder;
pub mod config;
pub mod error;
pub mod middleware;
pub mod platform;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod shipping_info;
pub mod shipping_methods;
pub mod state;
