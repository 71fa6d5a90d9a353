//! Internal client state and the request pipeline.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::auth::{API_VERSION_HEADER, SessionManager};
use crate::config::ClientConfig;
use crate::resource::{Accessor, CapabilityTable};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::types::resource_type_from_content_type;
use crate::Error;

pub(crate) struct ClientInner {
    /// Connection settings.
    pub config: ClientConfig,

    /// Session token and the credentials to renew it.
    pub session: SessionManager,

    /// Transport every request goes through.
    pub transport: Arc<dyn HttpTransport>,

    /// Verbs available per resource type.
    pub capabilities: CapabilityTable,

    /// Root accessors, bound once at construction.
    pub root: BTreeMap<String, Accessor>,
}

impl ClientInner {
    fn build_request(&self, method: HttpMethod, path: &str, body: Option<&str>) -> HttpRequest {
        let mut request = HttpRequest::new(method, path)
            .with_header(API_VERSION_HEADER, self.session.api_version())
            .with_header("Accept", "application/json");

        let token = self.session.token();
        if !token.is_empty() {
            request = request.with_header("Cookie", token.header_value());
        }
        if let Some(body) = body {
            request = request.with_body(body);
        }
        request
    }

    /// Sends a request, renewing the session once if it was rejected.
    ///
    /// A 403 triggers a single login and a single replay with the new
    /// token. A second 403 is an authentication error; any other status is
    /// returned for the caller to interpret.
    pub(crate) fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, Error> {
        let response = self.execute(method, path, body)?;
        if response.status != 403 {
            return Ok(response);
        }

        if !self.session.can_renew() {
            return Err(Error::authentication(format!(
                "{} {} rejected and no credentials are configured to renew the session",
                method, path
            ))
            .with_status(response.status)
            .with_body(response.body));
        }
        self.session.reauthenticate(self.transport.as_ref())?;

        let response = self.execute(method, path, body)?;
        if response.status == 403 {
            return Err(Error::authentication(format!(
                "{} {} rejected after reauthentication",
                method, path
            ))
            .with_status(response.status)
            .with_body(response.body));
        }
        Ok(response)
    }

    fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, Error> {
        let request = self.build_request(method, path, body);
        let response = self.transport.execute(&request)?;
        debug!(
            method = %method,
            path = path,
            status = response.status,
            "api request"
        );
        Ok(response)
    }

    /// Extracts the resource type from a vendor media type, or `""`.
    pub(crate) fn resource_type_of(&self, response: &HttpResponse) -> String {
        response
            .content_type()
            .and_then(|ct| resource_type_from_content_type(ct, &self.config.vendor))
            .unwrap_or_default()
    }

    /// Reduces an absolute `Location` under the API base to a path.
    pub(crate) fn relative_location<'a>(&self, location: &'a str) -> &'a str {
        let base = self.config.base_url();
        match location.strip_prefix(base) {
            Some(path) if path.starts_with('/') => path,
            _ => location,
        }
    }
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("root", &self.root.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
