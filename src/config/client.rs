//! Connection settings for the API client.

use std::time::Duration;

use super::TlsConfig;
use crate::Error;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://my.rightscale.com";

/// Default (and minimum) API version.
pub const DEFAULT_API_VERSION: &str = "1.5";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const MINIMUM_API_VERSION: f64 = 1.5;

/// Connection settings shared by every request a client makes.
///
/// ## Default Values
///
/// - `api_url`: `https://my.rightscale.com`
/// - `api_version`: `1.5`
/// - `vendor`: `rightscale`
/// - `timeout`: 60s
///
/// ## Example
///
/// ```rust
/// use right_api::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .api_url("https://us-4.rightscale.com")
///     .timeout(Duration::from_secs(30))
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct ClientConfig {
    /// API base URL.
    #[builder(into, default = DEFAULT_API_URL.to_string())]
    pub api_url: String,

    /// Value of the `X-API-Version` header; must be at least 1.5.
    #[builder(into, default = DEFAULT_API_VERSION.to_string())]
    pub api_version: String,

    /// Vendor segment expected in response media types.
    #[builder(into, default = crate::types::DEFAULT_VENDOR.to_string())]
    pub vendor: String,

    /// Request timeout for the REST transport.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// TLS settings for the REST transport.
    #[builder(default)]
    pub tls: TlsConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientConfig {
    /// Checks the settings, failing with a configuration error.
    pub fn validate(&self) -> Result<(), Error> {
        let version: f64 = self.api_version.trim().parse().map_err(|_| {
            Error::configuration(format!(
                "api_version {:?} is not a number",
                self.api_version
            ))
        })?;
        if version < MINIMUM_API_VERSION {
            return Err(Error::configuration(
                "This API client is only compatible with RightScale API 1.5 and upwards.",
            ));
        }

        url::Url::parse(&self.api_url)?;

        if self.vendor.is_empty() {
            return Err(Error::configuration("vendor cannot be empty"));
        }

        Ok(())
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}
