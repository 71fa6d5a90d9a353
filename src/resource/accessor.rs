//! Bound navigation targets.

use super::{DummyMethod, DummyResource, Node, Resource, RestrictedRoot};
use crate::types::Params;
use crate::{Client, Error};

/// What a named association resolves to when invoked.
///
/// Associations are bound from the `links` array of a response (see
/// [`bind_links`](super::bind_links)) or, for instance-token clients, from
/// the capability table.
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    /// GET each href and build the result.
    ///
    /// A single href yields that result directly; several yield
    /// [`Node::Many`] in href order.
    Link {
        /// Target hrefs, in the order the links appeared.
        hrefs: Vec<String>,
    },

    /// The tags root, which cannot be indexed. Invoking it returns a
    /// synthetic resource with `by_tag`, `by_resource`, `multi_add` and
    /// `multi_delete`.
    Tags {
        /// Base href, normally `/api/tags`.
        href: String,
    },

    /// The backups root.
    ///
    /// With parameters it performs a GET; without, it returns a synthetic
    /// resource exposing `create` and `cleanup`.
    Backups {
        /// Base href, normally `/api/backups`.
        href: String,
    },

    /// A child resource already present in the parent's payload.
    Embedded(Box<Resource>),

    /// A root collection that cannot be indexed with an instance token.
    Restricted(RestrictedRoot),
}

const TAG_METHODS: &[(&str, DummyMethod)] = &[
    ("by_tag", DummyMethod::Post),
    ("by_resource", DummyMethod::Post),
    ("multi_add", DummyMethod::Post),
    ("multi_delete", DummyMethod::Post),
];

const BACKUP_METHODS: &[(&str, DummyMethod)] =
    &[("create", DummyMethod::Post), ("cleanup", DummyMethod::Post)];

impl Accessor {
    /// Returns the hrefs this accessor targets.
    pub fn hrefs(&self) -> Vec<&str> {
        match self {
            Accessor::Link { hrefs } => hrefs.iter().map(String::as_str).collect(),
            Accessor::Tags { href } | Accessor::Backups { href } => vec![href.as_str()],
            Accessor::Embedded(resource) => resource.href().into_iter().collect(),
            Accessor::Restricted(root) => vec![root.path],
        }
    }

    pub(crate) fn invoke(&self, client: &Client, mut params: Params) -> Result<Node, Error> {
        match self {
            Accessor::Link { hrefs } => match hrefs.as_slice() {
                [href] => client.resource(href, params),
                hrefs => hrefs
                    .iter()
                    .map(|href| client.resource(href, params.clone()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Node::Many),
            },
            Accessor::Tags { href } => Ok(Node::Dummy(DummyResource::new(
                client,
                href.clone(),
                TAG_METHODS.iter().copied(),
            ))),
            Accessor::Backups { href } => {
                if params.is_empty() {
                    Ok(Node::Dummy(DummyResource::new(
                        client,
                        href.clone(),
                        BACKUP_METHODS.iter().copied(),
                    )))
                } else {
                    client.resource(href, params)
                }
            }
            Accessor::Embedded(resource) => Ok(Node::Resource((**resource).clone())),
            Accessor::Restricted(root) => {
                let path = match params.take_id() {
                    Some(id) => format!("{}/{}", root.path, id),
                    None => root.path.to_string(),
                };
                Ok(Node::Dummy(DummyResource::new(
                    client,
                    path,
                    root.methods.iter().copied(),
                )))
            }
        }
    }
}
