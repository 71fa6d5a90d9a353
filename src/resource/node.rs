//! The value returned by every accessor, action and verb.

use serde_json::Value;

use super::{DummyResource, Resource, ResourceCollection};
use crate::Error;
use crate::transport::HttpResponse;

/// Result of navigating the API.
///
/// Which variant comes back depends on the response: a vendor-typed object
/// becomes a [`Resource`], a vendor-typed array a [`ResourceCollection`],
/// and a multi-href link a [`Node::Many`] with one entry per href.
#[derive(Debug, Clone)]
pub enum Node {
    /// A single resource.
    Resource(Resource),
    /// A collection of resources of one type.
    Collection(ResourceCollection),
    /// One result per href of a multi-href link, in href order.
    Many(Vec<Node>),
    /// A synthetic resource exposing a fixed method map.
    Dummy(DummyResource),
    /// A JSON body without a vendor type, or an attribute value.
    Json(Value),
    /// A successful response with no resource to build.
    Response(HttpResponse),
}

impl Node {
    /// Returns the resource, failing if this is another variant.
    pub fn into_resource(self) -> Result<Resource, Error> {
        match self {
            Node::Resource(resource) => Ok(resource),
            other => Err(other.mismatch("resource")),
        }
    }

    /// Returns the collection, failing if this is another variant.
    pub fn into_collection(self) -> Result<ResourceCollection, Error> {
        match self {
            Node::Collection(collection) => Ok(collection),
            other => Err(other.mismatch("collection")),
        }
    }

    /// Returns the synthetic resource, failing if this is another variant.
    pub fn into_dummy(self) -> Result<DummyResource, Error> {
        match self {
            Node::Dummy(dummy) => Ok(dummy),
            other => Err(other.mismatch("dummy resource")),
        }
    }

    /// Returns the per-href results, failing if this is another variant.
    pub fn into_many(self) -> Result<Vec<Node>, Error> {
        match self {
            Node::Many(nodes) => Ok(nodes),
            other => Err(other.mismatch("list of results")),
        }
    }

    /// Returns the JSON value, failing if this is another variant.
    pub fn into_json(self) -> Result<Value, Error> {
        match self {
            Node::Json(value) => Ok(value),
            other => Err(other.mismatch("JSON value")),
        }
    }

    /// Returns the resource if this is one.
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Node::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the collection if this is one.
    pub fn as_collection(&self) -> Option<&ResourceCollection> {
        match self {
            Node::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Returns the content-type tag of a resource or collection.
    pub fn resource_type(&self) -> Option<&str> {
        match self {
            Node::Resource(resource) => Some(resource.resource_type()),
            Node::Collection(collection) => Some(collection.resource_type()),
            _ => None,
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Node::Resource(_) => "resource",
            Node::Collection(_) => "collection",
            Node::Many(_) => "list of results",
            Node::Dummy(_) => "dummy resource",
            Node::Json(_) => "JSON value",
            Node::Response(_) => "raw response",
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::malformed(format!(
            "expected a {}, got a {}",
            expected,
            self.variant_name()
        ))
    }
}
