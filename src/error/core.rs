//! Main error type for the RightScale API client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The error type for every fallible SDK operation.
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option<u16>      (HTTP status, when the server answered)
/// ├── body: Option<String>     (response body, when the server answered)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use right_api::{Error, ErrorKind};
///
/// fn report(err: &Error) {
///     match err.kind() {
///         ErrorKind::UnexpectedStatus => {
///             eprintln!("HTTP {:?}: {:?}", err.status(), err.body());
///         }
///         ErrorKind::Authentication => eprintln!("check credentials"),
///         _ => eprintln!("{err}"),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    status: Option<u16>,
    body: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// ```rust
    /// use right_api::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Configuration, "api_version must be >= 1.5");
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Authentication => "authentication failed",
            ErrorKind::UnexpectedStatus => "unexpected response status",
            ErrorKind::MalformedResponse => "malformed response",
            ErrorKind::Transport => "transport failure",
            ErrorKind::UnsupportedOperation => "operation not supported",
        };
        Self::new(kind, message)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status the server answered with, if any.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the response body the server answered with, if any.
    #[inline]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Attaches the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches the response body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for common error types

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Creates an unexpected-status error carrying the status and body.
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnexpectedStatus,
            format!("unexpected response {status}"),
        )
        .with_status(status)
        .with_body(body)
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates an unsupported operation error naming the missing capability.
    pub fn unsupported(name: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedOperation,
            format!("no capability named `{name}`"),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref body) = self.body {
            if !body.is_empty() {
                write!(f, ", {}", body)?;
            }
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::transport(err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::malformed(format!("JSON error: {}", err)).with_source(err)
    }
}
