//! Error types for the RightScale API client.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//!
//! ## Propagation
//!
//! An HTTP 403 is recovered locally exactly once by renewing the session and
//! replaying the request. Every other non-conforming status is surfaced to the
//! caller with its status code and body attached:
//!
//! ```rust,ignore
//! match deployment.destroy() {
//!     Err(err) if err.kind() == ErrorKind::UnexpectedStatus => {
//!         eprintln!("HTTP {:?}: {:?}", err.status(), err.body());
//!     }
//!     other => other?,
//! }
//! ```

mod core;
mod kind;

pub use core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;
