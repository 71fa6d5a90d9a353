//! Client builder with typestate pattern.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{
    Client, Error,
    auth::{Credentials, INSTANCE_SESSION_PATH, SESSION_PATH, SessionManager, SessionToken},
    config::{ClientConfig, TlsConfig},
    resource::{Accessor, CapabilityTable, bind_links},
    transport::HttpTransport,
    types::{Link, Params},
};

/// Marker type: neither credentials nor a session token provided yet.
pub struct NoCredentials;

/// Marker type: credentials or a session token have been provided.
pub struct HasCredentials;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so that `build()` is only available once
/// credentials or a session token have been provided.
///
/// ## Required Configuration
///
/// - `credentials()` or `session_token()`
///
/// ## Optional Configuration
///
/// - `api_url()`, `api_version()`, `vendor()`, `timeout()`, `tls_config()`
/// - `config()`: replaces all of the above at once
/// - `transport()`: a custom [`HttpTransport`] instead of the REST transport
/// - `capabilities()`: a custom [`CapabilityTable`]
///
/// ## Example
///
/// ```rust,ignore
/// use right_api::{Client, Credentials};
///
/// let client = Client::builder()
///     .api_url("https://us-4.rightscale.com")
///     .credentials(Credentials::password("ops@example.com", "s3cret", "1234"))
///     .build()?;
/// ```
pub struct ClientBuilder<CredentialsState> {
    config: ClientConfig,
    credentials: Option<Credentials>,
    session_token: Option<SessionToken>,
    transport: Option<Arc<dyn HttpTransport>>,
    capabilities: CapabilityTable,
    _credentials_state: PhantomData<CredentialsState>,
}

impl ClientBuilder<NoCredentials> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            credentials: None,
            session_token: None,
            transport: None,
            capabilities: CapabilityTable::default(),
            _credentials_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ClientBuilder<C> {
    fn into_state<N>(self) -> ClientBuilder<N> {
        ClientBuilder {
            config: self.config,
            credentials: self.credentials,
            session_token: self.session_token,
            transport: self.transport,
            capabilities: self.capabilities,
            _credentials_state: PhantomData,
        }
    }

    /// Sets the login credentials.
    ///
    /// Credentials are also used to log in again when the server rejects
    /// the session with a 403.
    pub fn credentials(mut self, credentials: impl Into<Credentials>) -> ClientBuilder<HasCredentials> {
        self.credentials = Some(credentials.into());
        self.into_state()
    }

    /// Reuses a session from an earlier login, skipping the login exchange.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let client = Client::builder()
    ///     .session_token("rs_gbl=...; _session_id=...".parse()?)
    ///     .build()?;
    /// ```
    pub fn session_token(mut self, token: SessionToken) -> ClientBuilder<HasCredentials> {
        self.session_token = Some(token);
        self.into_state()
    }

    /// Replaces the whole connection configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.config.api_url = api_url.into();
        self
    }

    /// Sets the API version sent in `X-API-Version`.
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.config.api_version = api_version.into();
        self
    }

    /// Sets the vendor segment expected in media types.
    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.config.vendor = vendor.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.config.tls = config;
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// **WARNING**: only for development against self-signed endpoints.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.config.tls.skip_verification = true;
        self
    }

    /// Routes every request through a custom transport.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use right_api::transport::MockTransport;
    ///
    /// let mock = Arc::new(MockTransport::new());
    /// let client = Client::builder()
    ///     .credentials(credentials)
    ///     .transport(mock.clone())
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the capability table.
    #[must_use]
    pub fn capabilities(mut self, capabilities: CapabilityTable) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl ClientBuilder<HasCredentials> {
    /// Builds the client.
    ///
    /// Logs in unless a session token was provided, then binds the root
    /// accessors: from the session resource's links for user credentials,
    /// or from the capability table for instance tokens.
    ///
    /// # Errors
    ///
    /// - [`Configuration`](crate::ErrorKind::Configuration) for invalid
    ///   settings or incomplete credentials
    /// - [`Authentication`](crate::ErrorKind::Authentication) if the login
    ///   is rejected
    /// - any error from fetching the session resource
    pub fn build(self) -> Result<Client, Error> {
        self.config.validate()?;
        if let Some(ref credentials) = self.credentials {
            credentials.validate()?;
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&self.config)?,
        };

        let session = SessionManager::new(
            self.credentials,
            self.config.api_version.clone(),
            self.session_token,
        );
        if !session.has_token() {
            session.authenticate(transport.as_ref())?;
        }

        let mut inner = ClientInner {
            config: self.config,
            session,
            transport,
            capabilities: self.capabilities,
            root: BTreeMap::new(),
        };
        inner.root = if inner.session.is_instance_token() {
            instance_root(&inner.capabilities)
        } else {
            session_root(&inner)?
        };

        info!(
            api_url = inner.config.base_url(),
            instance_token = inner.session.is_instance_token(),
            roots = inner.root.len(),
            "client ready"
        );
        Ok(Client::from_inner(inner))
    }
}

#[cfg(feature = "rest")]
fn default_transport(config: &ClientConfig) -> Result<Arc<dyn HttpTransport>, Error> {
    Ok(Arc::new(RestTransport::new(
        config.base_url(),
        &config.tls,
        config.timeout,
    )?))
}

#[cfg(not(feature = "rest"))]
fn default_transport(_config: &ClientConfig) -> Result<Arc<dyn HttpTransport>, Error> {
    Err(Error::configuration(
        "no transport configured and the 'rest' feature is not enabled",
    ))
}

/// Root accessors for user sessions: `session` plus every session link.
fn session_root(inner: &ClientInner) -> Result<BTreeMap<String, Accessor>, Error> {
    let fetched = inner.fetch(SESSION_PATH, Params::new())?;
    let links: Vec<Link> = match fetched.data.get("links") {
        Some(links) => serde_json::from_value(links.clone()).map_err(|e| {
            Error::malformed(format!("invalid links in session resource: {}", e)).with_source(e)
        })?,
        None => Vec::new(),
    };
    let links: Vec<Link> = links.into_iter().filter(|l| !l.is_self()).collect();

    let mut root = bind_links(&links);
    root.insert(
        "session".to_string(),
        Accessor::Link {
            hrefs: vec![SESSION_PATH.to_string()],
        },
    );
    Ok(root)
}

/// Root accessors for instance tokens, which cannot index the session.
fn instance_root(capabilities: &CapabilityTable) -> BTreeMap<String, Accessor> {
    let mut root = BTreeMap::new();
    root.insert(
        "get_instance".to_string(),
        Accessor::Link {
            hrefs: vec![INSTANCE_SESSION_PATH.to_string()],
        },
    );
    for restricted in capabilities.instance_restricted {
        root.insert(
            restricted.name.to_string(),
            Accessor::Restricted(*restricted),
        );
    }
    root.insert(
        "backups".to_string(),
        Accessor::Backups {
            href: "/api/backups".to_string(),
        },
    );
    root
}
