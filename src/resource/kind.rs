//! Resource kinds parsed from the content-type tag.

use std::fmt;

/// The kind of a resource, selected by its content-type tag.
///
/// Known kinds are the ones the client attaches extra behavior to; any other
/// tag is kept verbatim in [`ResourceKind::Other`].
///
/// ```rust
/// use right_api::ResourceKind;
///
/// assert_eq!(ResourceKind::from_type("server_array"), ResourceKind::ServerArray);
/// assert_eq!(ResourceKind::from_type("cloud").as_str(), "cloud");
/// assert!(matches!(ResourceKind::from_type("alert_spec"), ResourceKind::Other(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `deployment`
    Deployment,
    /// `server`
    Server,
    /// `server_array`
    ServerArray,
    /// `instance`
    Instance,
    /// `input`
    Input,
    /// `ssh_key`
    SshKey,
    /// `volume`
    Volume,
    /// `volume_snapshot`
    VolumeSnapshot,
    /// `volume_attachment`
    VolumeAttachment,
    /// `backup`
    Backup,
    /// `cloud`
    Cloud,
    /// `session`
    Session,
    /// Any other tag.
    Other(String),
}

impl ResourceKind {
    /// Selects the kind for a content-type tag.
    pub fn from_type(resource_type: &str) -> Self {
        match resource_type {
            "deployment" => ResourceKind::Deployment,
            "server" => ResourceKind::Server,
            "server_array" => ResourceKind::ServerArray,
            "instance" => ResourceKind::Instance,
            "input" => ResourceKind::Input,
            "ssh_key" => ResourceKind::SshKey,
            "volume" => ResourceKind::Volume,
            "volume_snapshot" => ResourceKind::VolumeSnapshot,
            "volume_attachment" => ResourceKind::VolumeAttachment,
            "backup" => ResourceKind::Backup,
            "cloud" => ResourceKind::Cloud,
            "session" => ResourceKind::Session,
            other => ResourceKind::Other(other.to_string()),
        }
    }

    /// Returns the content-type tag.
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Deployment => "deployment",
            ResourceKind::Server => "server",
            ResourceKind::ServerArray => "server_array",
            ResourceKind::Instance => "instance",
            ResourceKind::Input => "input",
            ResourceKind::SshKey => "ssh_key",
            ResourceKind::Volume => "volume",
            ResourceKind::VolumeSnapshot => "volume_snapshot",
            ResourceKind::VolumeAttachment => "volume_attachment",
            ResourceKind::Backup => "backup",
            ResourceKind::Cloud => "cloud",
            ResourceKind::Session => "session",
            ResourceKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
