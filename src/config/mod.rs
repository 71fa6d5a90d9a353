//! Configuration types for the client.
//!
//! - [`ClientConfig`]: API URL, API version, vendor, timeout
//! - [`TlsConfig`]: TLS/SSL settings for the REST transport

mod client;
mod tls;

pub use client::{ClientConfig, DEFAULT_API_URL, DEFAULT_API_VERSION, DEFAULT_TIMEOUT};
pub use tls::TlsConfig;
