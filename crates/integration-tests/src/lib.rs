//! Integration tests for the Wallart checkout extension.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the extension
//! cargo run -p wallart-checkout-extension
//!
//! # Run integration tests
//! cargo test -p wallart-checkout-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `extension_cart` - Cart-update extension calls against a running
//!   server
//!
//! Tests are `#[ignore]`d by default because they need a running server
//! and, for the express branches, reachable upstream services.
