//! Transport trait definitions and request/response types.
//!
//! Requests and responses are plain data. The dispatcher builds an
//! [`HttpRequest`] and interprets the [`HttpResponse`]; an [`HttpTransport`]
//! only moves bytes.

use std::fmt;

use crate::Error;

// ============================================================================
// Method
// ============================================================================

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request / Response
// ============================================================================

/// An HTTP request described as plain data.
///
/// `path` is relative to the API base URL and may carry a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Path and query, relative to the API base.
    pub path: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Form-encoded body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Header name/value pairs; repeated headers appear once per value.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates an empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Creates a response carrying a vendor-typed JSON body.
    ///
    /// ```rust
    /// use right_api::transport::HttpResponse;
    ///
    /// let response = HttpResponse::resource(200, "deployment", &serde_json::json!({"name": "web"}));
    /// assert_eq!(
    ///     response.content_type(),
    ///     Some("application/vnd.rightscale.deployment+json")
    /// );
    /// ```
    pub fn resource(status: u16, resource_type: &str, body: &serde_json::Value) -> Self {
        Self::new(status)
            .with_header(
                "content-type",
                format!("application/vnd.rightscale.{}+json", resource_type),
            )
            .with_body(body.to_string())
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns every value of the given header (case-insensitive).
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `Content-Type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

// ============================================================================
// Transport
// ============================================================================

/// Moves one request to the API and returns the raw response.
///
/// Implementations must not follow redirects: the login exchange is
/// acknowledged with a 302 that the session layer needs to see. Non-2xx
/// statuses are returned as responses, not errors; only failures to complete
/// the exchange are errors.
pub trait HttpTransport: Send + Sync {
    /// Executes a request.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}
