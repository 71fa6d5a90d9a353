//! Synthetic resources for roots the API cannot index.

use std::fmt;

use super::Node;
use crate::types::Params;
use crate::{Client, Error};

/// How a [`DummyResource`] method is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DummyMethod {
    /// `POST path/name`, or `POST path` for `create`.
    Post,
    /// `GET path/name`, building the result.
    Get,
    /// Narrows to `path/instances[/id]`, returning a synthetic resource
    /// exposing `live_tasks`.
    Instances,
    /// `GET path/live/tasks`, building the result.
    LiveTasks,
}

/// A stand-in for a collection whose index cannot be fetched.
///
/// It has no attributes and exposes only the methods it was created with.
/// Anything else fails with
/// [`ErrorKind::UnsupportedOperation`](crate::ErrorKind::UnsupportedOperation).
///
/// ```rust,ignore
/// let tags = client.follow("tags", Params::new())?.into_dummy()?;
/// let tagged = tags.call("by_tag", Params::new()
///     .set("resource_type", "servers")
///     .set("tags", vec!["env:prod"]))?;
/// ```
#[derive(Clone)]
pub struct DummyResource {
    client: Client,
    path: String,
    methods: Vec<(String, DummyMethod)>,
}

impl DummyResource {
    /// Creates a synthetic resource over `path`.
    pub fn new<S: Into<String>>(
        client: &Client,
        path: impl Into<String>,
        methods: impl IntoIterator<Item = (S, DummyMethod)>,
    ) -> Self {
        Self {
            client: client.clone(),
            path: path.into(),
            methods: methods
                .into_iter()
                .map(|(name, method)| (name.into(), method))
                .collect(),
        }
    }

    /// Returns the base path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the declared method names.
    pub fn api_methods(&self) -> Vec<&str> {
        self.methods.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns how `name` is dispatched, if declared.
    pub fn method(&self, name: &str) -> Option<DummyMethod> {
        self.methods
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, method)| *method)
    }

    /// Invokes a declared method.
    pub fn call(&self, name: &str, mut params: Params) -> Result<Node, Error> {
        let method = self.method(name).ok_or_else(|| Error::unsupported(name))?;
        match method {
            DummyMethod::Instances => {
                let mut path = format!("{}/instances", self.path);
                if let Some(id) = params.take_id() {
                    path.push('/');
                    path.push_str(&id);
                }
                Ok(Node::Dummy(DummyResource::new(
                    &self.client,
                    path,
                    [("live_tasks", DummyMethod::LiveTasks)],
                )))
            }
            DummyMethod::LiveTasks => self
                .client
                .resource(&format!("{}/live/tasks", self.path), params),
            DummyMethod::Get => self
                .client
                .resource(&format!("{}/{}", self.path, name), params),
            DummyMethod::Post if name == "create" => self.client.do_post(&self.path, params),
            DummyMethod::Post => self
                .client
                .do_post(&format!("{}/{}", self.path, name), params),
        }
    }
}

impl fmt::Debug for DummyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyResource")
            .field("path", &self.path)
            .field("methods", &self.api_methods())
            .finish()
    }
}

impl PartialEq for DummyResource {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.methods == other.methods
    }
}
