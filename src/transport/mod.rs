//! Transport layer for API communication.
//!
//! - [`RestTransport`]: blocking HTTP via reqwest (feature `rest`, default)
//! - [`MockTransport`]: scripted in-memory transport for tests
//!
//! Any type implementing [`HttpTransport`] can be handed to
//! [`ClientBuilder::transport`](crate::ClientBuilder::transport).

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub(crate) mod mock;

pub use mock::MockTransport;
pub use traits::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

#[cfg(feature = "rest")]
pub use rest::RestTransport;
