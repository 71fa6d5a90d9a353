//! Integration tests for the RightScale API client.
//!
//! Every test scripts the API with [`MockTransport`](right_api::transport::MockTransport)
//! and asserts on the requests the client sends, so no network access is
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With request logging
//! RUST_LOG=right_api=debug cargo test --test integration -- --nocapture
//! ```

mod common;
mod instance_tests;
mod navigation_tests;
mod session_tests;
