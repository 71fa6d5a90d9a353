//! The API client and its entry points.
//!
//! The client holds the session and the root accessors. Everything else is
//! reached by following links from there.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use right_api::prelude::*;
//!
//! let client = Client::builder()
//!     .credentials(Credentials::password("ops@example.com", "s3cret", "1234"))
//!     .build()?;
//!
//! let deployments = client.follow("deployments", Params::new())?.into_collection()?;
//! for deployment in &deployments {
//!     println!("{:?}", deployment.attribute("name"));
//! }
//! ```

mod builder;
mod dispatch;
mod inner;

pub use builder::{ClientBuilder, HasCredentials, NoCredentials};
pub use dispatch::Fetched;

use std::fmt;
use std::sync::Arc;

use crate::auth::SessionToken;
use crate::config::ClientConfig;
use crate::resource::{Accessor, CapabilityTable, Node, Resource};
use crate::types::Params;
use crate::Error;

/// The RightScale API client.
///
/// Create one with [`Client::builder()`]. Construction logs in and binds the
/// root accessors:
///
/// - user credentials: `session` plus one accessor per link of the session
///   resource (`clouds`, `deployments`, `servers`, `tags`, ...)
/// - instance token: `get_instance`, `clouds` (restricted) and `backups`
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share the session, so a
/// renewal triggered by one clone is seen by all of them.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoCredentials> {
        ClientBuilder::new()
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Invokes a root accessor.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cloud = client.follow("clouds", Params::new().id("1"))?.into_resource()?;
    /// let servers = client.follow("servers", Params::new().filter("name==web"))?;
    /// ```
    pub fn follow(&self, name: &str, params: Params) -> Result<Node, Error> {
        self.inner
            .root
            .get(name)
            .ok_or_else(|| Error::unsupported(name))?
            .invoke(self, params)
    }

    /// Fetches the session resource. Not available with instance tokens.
    pub fn session(&self) -> Result<Resource, Error> {
        self.follow("session", Params::new())?.into_resource()
    }

    /// Fetches the instance the token belongs to. Only available with
    /// instance tokens.
    pub fn get_instance(&self) -> Result<Resource, Error> {
        self.follow("get_instance", Params::new())?.into_resource()
    }

    /// Returns the accessor bound to a root name.
    pub fn root(&self, name: &str) -> Option<&Accessor> {
        self.inner.root.get(name)
    }

    /// Lists the root accessor names.
    pub fn api_methods(&self) -> Vec<&str> {
        self.inner.root.keys().map(String::as_str).collect()
    }

    /// Returns `true` if the client logged in with an instance token.
    pub fn is_instance_token(&self) -> bool {
        self.inner.session.is_instance_token()
    }

    /// Returns the current session token.
    ///
    /// It can be handed to [`ClientBuilder::session_token`] to reuse the
    /// session in another client.
    pub fn session_token(&self) -> SessionToken {
        self.inner.session.token()
    }

    /// Returns the number of logins this client has performed.
    pub fn login_count(&self) -> u64 {
        self.inner.session.login_count()
    }

    /// Returns the connection configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the capability table resources are built with.
    pub fn capabilities(&self) -> &CapabilityTable {
        &self.inner.capabilities
    }

    /// Returns the base URL of the client.
    pub fn api_url(&self) -> &str {
        self.inner.config.base_url()
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<RightApiClient>")
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.api_url())
            .field("instance_token", &self.is_instance_token())
            .field("roots", &self.api_methods())
            .finish()
    }
}
