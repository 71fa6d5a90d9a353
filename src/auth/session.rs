//! Session token storage and the login exchange.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{info, warn};

use super::Credentials;
use crate::Error;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Header carrying the API version on every request.
pub const API_VERSION_HEADER: &str = "X-API-Version";

/// The cookie set identifying an authenticated session.
///
/// Obtained from the `Set-Cookie` headers of a login response and replayed
/// as a single `Cookie` header. Values are redacted from `Debug` output.
///
/// ```rust
/// use right_api::SessionToken;
///
/// let token: SessionToken = "rs_gbl=abc; _session_id=xyz".parse().unwrap();
/// assert_eq!(token.get("_session_id"), Some("xyz"));
/// assert_eq!(token.header_value(), "rs_gbl=abc; _session_id=xyz");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionToken {
    cookies: Vec<(String, String)>,
}

impl SessionToken {
    /// Creates an empty token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects cookies from `Set-Cookie` header values.
    ///
    /// Attributes after the first `;` (path, expiry, flags) are dropped.
    pub fn from_set_cookie<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut token = Self::new();
        for value in values {
            let pair = value.split(';').next().unwrap_or_default();
            if let Some((name, cookie)) = pair.split_once('=') {
                token.insert(name.trim(), cookie.trim());
            }
        }
        token
    }

    /// Sets a cookie, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.cookies.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.cookies.push((name, value)),
        }
    }

    /// Returns a cookie value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if no cookie is held.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Renders the `Cookie` header value.
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl FromStr for SessionToken {
    type Err = Error;

    /// Parses a `Cookie` header value (`a=1; b=2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut token = Self::new();
        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| Error::configuration(format!("invalid cookie pair {:?}", pair)))?;
            token.insert(name.trim(), value.trim());
        }
        if token.is_empty() {
            return Err(Error::configuration("session token has no cookies"));
        }
        Ok(token)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.cookies.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("SessionToken")
            .field("cookies", &names)
            .field("values", &"[REDACTED]")
            .finish()
    }
}

/// Holds the session for one client and renews it on demand.
///
/// The token is written only by [`authenticate`](Self::authenticate) and
/// read by every request.
pub(crate) struct SessionManager {
    credentials: Option<Credentials>,
    api_version: String,
    token: RwLock<SessionToken>,
    logins: AtomicU64,
}

impl SessionManager {
    pub(crate) fn new(
        credentials: Option<Credentials>,
        api_version: impl Into<String>,
        token: Option<SessionToken>,
    ) -> Self {
        Self {
            credentials,
            api_version: api_version.into(),
            token: RwLock::new(token.unwrap_or_default()),
            logins: AtomicU64::new(0),
        }
    }

    /// Returns `true` if a rejected session can be renewed by logging in.
    pub(crate) fn can_renew(&self) -> bool {
        self.credentials.is_some()
    }

    pub(crate) fn api_version(&self) -> &str {
        &self.api_version
    }

    pub(crate) fn is_instance_token(&self) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(Credentials::is_instance_token)
    }

    pub(crate) fn token(&self) -> SessionToken {
        self.token.read().clone()
    }

    pub(crate) fn has_token(&self) -> bool {
        !self.token.read().is_empty()
    }

    /// Number of successful logins performed by this manager.
    pub(crate) fn login_count(&self) -> u64 {
        self.logins.load(Ordering::Relaxed)
    }

    /// Logs in and stores the resulting token.
    ///
    /// Succeeds only on a 302 (the login acknowledgement) or a 2xx carrying
    /// at least one cookie.
    pub(crate) fn authenticate(&self, transport: &dyn HttpTransport) -> Result<SessionToken, Error> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            Error::authentication("session expired and no credentials are configured to renew it")
        })?;

        let request = HttpRequest::new(HttpMethod::Post, credentials.login_path())
            .with_header(API_VERSION_HEADER, self.api_version.clone())
            .with_body(credentials.login_form().as_str());

        let response = transport.execute(&request)?;
        let token = token_from_login(&response)?;

        *self.token.write() = token.clone();
        self.logins.fetch_add(1, Ordering::Relaxed);
        info!(
            path = credentials.login_path(),
            status = response.status,
            "authenticated"
        );
        Ok(token)
    }

    /// Renews the session after the server rejected the current token.
    pub(crate) fn reauthenticate(&self, transport: &dyn HttpTransport) -> Result<(), Error> {
        warn!("session rejected with 403, reauthenticating");
        self.authenticate(transport).map(|_| ())
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("credentials", &self.credentials)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

fn token_from_login(response: &HttpResponse) -> Result<SessionToken, Error> {
    if response.status != 302 && !response.is_success() {
        return Err(Error::authentication(format!(
            "login failed with status {}",
            response.status
        ))
        .with_status(response.status)
        .with_body(response.body.clone()));
    }

    let token = SessionToken::from_set_cookie(response.header_values("set-cookie"));
    if token.is_empty() {
        return Err(Error::authentication("login response carried no session cookie")
            .with_status(response.status));
    }
    Ok(token)
}
