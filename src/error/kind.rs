//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// This enum provides a stable interface for matching on error types.
///
/// | ErrorKind              | Raised when                                           |
/// |------------------------|-------------------------------------------------------|
/// | `Configuration`        | Bad API version, missing or conflicting auth params   |
/// | `Authentication`       | Login failed, or a 403 survived the single replay     |
/// | `UnexpectedStatus`     | HTTP status outside the contract for the verb         |
/// | `MalformedResponse`    | Unparsable JSON, bad envelope shape, missing `href`   |
/// | `Transport`            | The transport could not complete the exchange         |
/// | `UnsupportedOperation` | A capability the resource does not expose was called  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Client configuration is invalid.
    ///
    /// **Not recoverable.** Fix the configuration.
    #[error("configuration error")]
    Configuration,

    /// Authentication failed.
    ///
    /// Raised by a rejected login, or by a request answered with HTTP 403
    /// after the session was renewed once.
    #[error("authentication failed")]
    Authentication,

    /// The server answered with a status outside the verb's contract.
    ///
    /// The status code and response body are attached to the error.
    #[error("unexpected status")]
    UnexpectedStatus,

    /// Response could not be parsed or did not have the expected shape.
    #[error("malformed response")]
    MalformedResponse,

    /// Transport layer error (DNS, TLS, connection reset, timeout).
    #[error("transport error")]
    Transport,

    /// The requested capability is not bound on this resource.
    #[error("unsupported operation")]
    UnsupportedOperation,
}

impl ErrorKind {
    /// Returns `true` if this kind is recovered by renewing the session.
    ///
    /// Only HTTP 403 answers trigger reauthentication; this reports whether
    /// the kind can originate from one.
    #[inline]
    pub fn is_session_related(&self) -> bool {
        matches!(self, ErrorKind::Authentication)
    }

    /// Returns `true` if the error carries details from an HTTP response.
    #[inline]
    pub fn is_server_reported(&self) -> bool {
        matches!(
            self,
            ErrorKind::Authentication | ErrorKind::UnexpectedStatus
        )
    }
}
