//! Static tables of verbs the API supports per resource type.
//!
//! The API does not advertise create/update/destroy in its envelopes, so
//! which of them apply to a resource type is declared here.

use super::DummyMethod;

/// A root collection that instance-token sessions may not index.
///
/// It is exposed as a [`DummyResource`](super::DummyResource) over `path`
/// with the listed methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictedRoot {
    /// Accessor name on the client.
    pub name: &'static str,
    /// Base path of the collection.
    pub path: &'static str,
    /// Methods the synthetic resource exposes.
    pub methods: &'static [(&'static str, DummyMethod)],
}

/// Which standard verbs apply to which resource types.
///
/// Passed into the resource factory as immutable configuration.
///
/// ```rust
/// use right_api::CapabilityTable;
///
/// let table = CapabilityTable::default();
/// assert!(table.can_create("deployment"));
/// assert!(table.can_destroy("backup"));
/// assert!(!table.can_create("backup"));
/// assert!(table.can_update("instance"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityTable {
    /// Types whose collections expose `create`.
    pub create: &'static [&'static str],
    /// Types whose resources expose `destroy`.
    pub destroy: &'static [&'static str],
    /// Types whose resources expose `update`.
    pub update: &'static [&'static str],
    /// Root collections replaced by synthetic resources under instance tokens.
    pub instance_restricted: &'static [RestrictedRoot],
}

/// The capability table of the RightScale 1.5 API.
pub const DEFAULT_CAPABILITIES: CapabilityTable = CapabilityTable {
    create: &[
        "deployment",
        "server_array",
        "server",
        "ssh_key",
        "volume",
        "volume_snapshot",
        "volume_attachment",
    ],
    destroy: &[
        "deployment",
        "server_array",
        "server",
        "ssh_key",
        "volume",
        "volume_snapshot",
        "volume_attachment",
        "backup",
    ],
    update: &["deployment", "instance", "server_array", "server", "backup"],
    instance_restricted: &[RestrictedRoot {
        name: "clouds",
        path: "/api/clouds",
        methods: &[
            ("volumes", DummyMethod::Get),
            ("volume_types", DummyMethod::Get),
            ("volume_attachments", DummyMethod::Get),
            ("volume_snapshots", DummyMethod::Get),
            ("instances", DummyMethod::Instances),
        ],
    }],
};

impl Default for CapabilityTable {
    fn default() -> Self {
        DEFAULT_CAPABILITIES
    }
}

impl CapabilityTable {
    /// Returns `true` if collections of this type expose `create`.
    pub fn can_create(&self, resource_type: &str) -> bool {
        self.create.contains(&resource_type)
    }

    /// Returns `true` if resources of this type expose `destroy`.
    pub fn can_destroy(&self, resource_type: &str) -> bool {
        self.destroy.contains(&resource_type)
    }

    /// Returns `true` if resources of this type expose `update`.
    pub fn can_update(&self, resource_type: &str) -> bool {
        self.update.contains(&resource_type)
    }
}
