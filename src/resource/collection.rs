//! Collections returned by index requests.

use std::fmt;

use super::{Node, Resource};
use crate::transport::HttpResponse;
use crate::types::Params;
use crate::{Client, Error};

/// Collection-level operations, selected by resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionMethod {
    /// `POST path`; types in the capability table's create set.
    Create,
    /// `POST path/multi_terminate`; instances.
    MultiTerminate,
    /// `POST path/multi_run_executable`; instances.
    MultiRunExecutable,
    /// `PUT path/multi_update`; inputs.
    MultiUpdate,
}

impl CollectionMethod {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionMethod::Create => "create",
            CollectionMethod::MultiTerminate => "multi_terminate",
            CollectionMethod::MultiRunExecutable => "multi_run_executable",
            CollectionMethod::MultiUpdate => "multi_update",
        }
    }
}

/// An ordered list of resources of one type.
///
/// Remembers the path it was fetched from so that collection methods
/// (`create`, `multi_terminate`, ...) address the same collection, query
/// string included.
#[derive(Clone)]
pub struct ResourceCollection {
    pub(crate) client: Client,
    pub(crate) resource_type: String,
    pub(crate) path: String,
    pub(crate) items: Vec<Resource>,
    pub(crate) methods: Vec<CollectionMethod>,
}

impl ResourceCollection {
    /// Returns the content-type tag of the items.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the path the collection was fetched from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an item by position.
    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.items.get(index)
    }

    /// Iterates over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.items.iter()
    }

    /// Returns the items as a slice.
    pub fn as_slice(&self) -> &[Resource] {
        &self.items
    }

    /// Consumes the collection, returning its items.
    pub fn into_vec(self) -> Vec<Resource> {
        self.items
    }

    /// Returns the collection methods available for this type.
    pub fn methods(&self) -> &[CollectionMethod] {
        &self.methods
    }

    /// Lists the collection method names.
    pub fn api_methods(&self) -> Vec<&'static str> {
        self.methods.iter().map(CollectionMethod::as_str).collect()
    }

    /// Creates a resource in this collection.
    pub fn create(&self, params: Params) -> Result<Node, Error> {
        self.require(CollectionMethod::Create)?;
        self.client.do_post(&self.path, params)
    }

    /// Terminates several instances at once.
    pub fn multi_terminate(&self, params: Params) -> Result<Node, Error> {
        self.require(CollectionMethod::MultiTerminate)?;
        self.client
            .do_post(&insert_in_path(&self.path, "multi_terminate"), params)
    }

    /// Runs an executable on several instances at once.
    pub fn multi_run_executable(&self, params: Params) -> Result<Node, Error> {
        self.require(CollectionMethod::MultiRunExecutable)?;
        self.client
            .do_post(&insert_in_path(&self.path, "multi_run_executable"), params)
    }

    /// Updates several inputs at once.
    pub fn multi_update(&self, params: Params) -> Result<HttpResponse, Error> {
        self.require(CollectionMethod::MultiUpdate)?;
        self.client
            .do_put(&insert_in_path(&self.path, "multi_update"), params)
    }

    /// Dispatches a collection method by name.
    pub fn call(&self, name: &str, params: Params) -> Result<Node, Error> {
        match name {
            "create" => self.create(params),
            "multi_terminate" => self.multi_terminate(params),
            "multi_run_executable" => self.multi_run_executable(params),
            "multi_update" => self.multi_update(params).map(Node::Response),
            _ => Err(Error::unsupported(name)),
        }
    }

    fn require(&self, method: CollectionMethod) -> Result<(), Error> {
        if self.methods.contains(&method) {
            Ok(())
        } else {
            Err(Error::unsupported(method.as_str()))
        }
    }
}

impl<'a> IntoIterator for &'a ResourceCollection {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ResourceCollection {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl fmt::Debug for ResourceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCollection")
            .field("resource_type", &self.resource_type)
            .field("path", &self.path)
            .field("items", &self.items)
            .field("methods", &self.methods)
            .finish()
    }
}

impl PartialEq for ResourceCollection {
    fn eq(&self, other: &Self) -> bool {
        self.resource_type == other.resource_type
            && self.path == other.path
            && self.items == other.items
            && self.methods == other.methods
    }
}

/// Inserts a path segment before the query string, if any.
pub(crate) fn insert_in_path(path: &str, term: &str) -> String {
    match path.split_once('?') {
        Some((base, query)) => format!("{}/{}?{}", base, term, query),
        None => format!("{}/{}", path, term),
    }
}
