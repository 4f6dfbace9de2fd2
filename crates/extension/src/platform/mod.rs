//! Commerce platform wire format.
//!
//! Submodules:
//! - [`types`] - cart payloads and shipping method shapes
//! - [`actions`] - cart update actions the extension answers with

pub mod actions;
pub mod types;

pub use actions::*;
pub use types::*;
