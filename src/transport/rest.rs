//! REST transport implementation using the blocking reqwest client.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::Error;
use crate::config::TlsConfig;
use crate::error::ErrorKind;
use crate::transport::traits::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::user_agent;

/// REST transport over a blocking HTTP client.
///
/// Redirects are never followed so that the 302 acknowledging a login
/// reaches the session layer.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a REST transport for the given API base URL.
    pub fn new(base_url: &str, tls_config: &TlsConfig, timeout: Duration) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;

        let mut client_builder = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(user_agent::user_agent());

        if tls_config.skip_verification {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        for pem in tls_config.root_certificates()? {
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::configuration(format!("invalid CA certificate: {}", e)).with_source(e)
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        let client = client_builder.build().map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self { client, base_url })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_headers(request: &HttpRequest) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                Error::configuration(format!("invalid header name: {}", name))
            })?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::configuration(format!("invalid value for header {}", name)))?;
            headers.append(name, value);
        }
        if request.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
        }
        Ok(headers)
    }
}

impl HttpTransport for RestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = self.base_url.join(&request.path).map_err(|e| {
            Error::new(ErrorKind::Configuration, format!("Invalid URL path: {}", e))
        })?;

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, url)
            .headers(Self::build_headers(request)?);
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Maps a reqwest error to an SDK error.
fn map_reqwest_error(err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        format!("request failed: {}", err)
    };
    Error::transport(message).with_source(err)
}
