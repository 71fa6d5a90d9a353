//! Authentication and session handling.
//!
//! - [`Credentials`]: user credentials or an instance token
//! - [`SessionToken`]: the cookie set identifying a session
//!
//! ## User credentials
//!
//! ```rust,ignore
//! use right_api::{Client, Credentials};
//!
//! let client = Client::builder()
//!     .credentials(Credentials::password("ops@example.com", "s3cret", "1234"))
//!     .build()?;
//! ```
//!
//! ## Instance token
//!
//! ```rust,ignore
//! let client = Client::builder()
//!     .credentials(Credentials::instance_token(std::env::var("RS_API_TOKEN")?))
//!     .build()?;
//! ```
//!
//! ## Reusing a session
//!
//! A token from an earlier login skips the login exchange. Credentials are
//! still needed if the session should be renewed when it expires.
//!
//! ```rust,ignore
//! let client = Client::builder()
//!     .credentials(credentials)
//!     .session_token("rs_gbl=...; _session_id=...".parse()?)
//!     .build()?;
//! ```

mod credentials;
mod session;

pub use credentials::{
    Credentials, INSTANCE_SESSION_PATH, InstanceTokenCredentials, PasswordCredentials,
    SESSION_PATH,
};
pub use session::{API_VERSION_HEADER, SessionToken};

pub(crate) use session::SessionManager;
