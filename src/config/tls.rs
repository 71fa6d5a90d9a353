//! Certificate trust settings for the API endpoint.

use std::path::PathBuf;

use crate::Error;

/// How the client trusts the API endpoint.
///
/// The hosted API at `my.rightscale.com` is covered by the system roots.
/// Private appliances and staging stacks often sit behind an internal CA,
/// which can be supplied as a file, as inline PEM, or both.
///
/// ```rust
/// use right_api::TlsConfig;
///
/// let trust = TlsConfig::builder()
///     .ca_cert_file("/etc/rightscale/ca.pem")
///     .build();
/// assert!(trust.has_custom_ca());
/// assert!(!trust.skip_verification);
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Path of a PEM file holding extra trusted CAs.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Extra trusted CAs as inline PEM.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Accept any server certificate. Local stubs only.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Trust settings that accept any certificate.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if any extra CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }

    /// Collects the configured CA bundles as PEM bytes, file first.
    ///
    /// An unreadable file is a configuration error.
    pub fn root_certificates(&self) -> Result<Vec<Vec<u8>>, Error> {
        let mut bundles = Vec::new();
        if let Some(ref path) = self.ca_cert_file {
            let pem = std::fs::read(path).map_err(|e| {
                Error::configuration(format!("cannot read CA file {}: {}", path.display(), e))
                    .with_source(e)
            })?;
            bundles.push(pem);
        }
        if let Some(ref pem) = self.ca_cert_pem {
            bundles.push(pem.as_bytes().to_vec());
        }
        Ok(bundles)
    }
}
