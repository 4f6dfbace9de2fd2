//! Business logic services.
//!
//! Services orchestrate the upstream API clients and the pure pricing
//! functions. Route handlers and the action builder go through this layer
//! instead of talking to clients directly.

pub mod shipping;

pub use shipping::*;
