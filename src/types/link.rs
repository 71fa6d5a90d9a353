//! Hypermedia links and action descriptors.

use serde::{Deserialize, Serialize};

/// The relation name the API uses for a resource's own address.
pub const SELF_REL: &str = "self";

/// A hypermedia link: where a related resource lives.
///
/// ```rust
/// use right_api::Link;
///
/// let link = Link::new("deployment", "/api/deployments/42");
/// assert_eq!(link.rel, "deployment");
/// assert_eq!(link.href(), Some("/api/deployments/42"));
/// assert!(!link.is_self());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Relation name.
    pub rel: String,
    /// Target address, relative to the API base.
    ///
    /// Absent or `null` in some envelopes; such links bind no accessor.
    #[serde(default)]
    pub href: Option<String>,
}

impl Link {
    /// Creates a link.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: Some(href.into()),
        }
    }

    /// Returns the target address, if the envelope carried one.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Returns `true` if this link points at the resource itself.
    pub fn is_self(&self) -> bool {
        self.rel == SELF_REL
    }
}

/// A server-declared operation, invoked as `POST href/rel`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Operation name.
    pub rel: String,
}

impl Action {
    /// Creates an action descriptor.
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }
}
