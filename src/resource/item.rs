//! A single resource built from a response envelope.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use super::{Accessor, Node, ResourceKind};
use crate::transport::HttpResponse;
use crate::types::{Link, Params};
use crate::{Client, Error};

/// Which standard verbs a resource exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Verbs {
    pub destroy: bool,
    pub update: bool,
    pub live_tasks: bool,
}

/// A resource returned by the API.
///
/// Built once from a response envelope and immutable afterward. Its names
/// fall into three disjoint groups:
///
/// - attributes: plain data fields ([`attribute`](Self::attribute))
/// - associations: links to related resources ([`follow`](Self::follow))
/// - actions: server-declared operations ([`perform`](Self::perform))
///
/// plus the standard verbs `destroy`, `update` and `live_tasks` where the
/// resource type supports them. [`call`](Self::call) dispatches any of these
/// by name; [`api_methods`](Self::api_methods) lists them.
///
/// ```rust,ignore
/// let server = client.follow("servers", Params::new().id("42"))?.into_resource()?;
/// println!("{}", server.attribute("name").unwrap_or_default());
///
/// let deployment = server.follow("deployment", Params::new())?;
/// server.perform("launch", Params::new())?;
/// server.update(Params::new().set("server", json!({"name": "web-2"})))?;
/// ```
#[derive(Clone)]
pub struct Resource {
    pub(crate) client: Client,
    pub(crate) resource_type: String,
    pub(crate) kind: ResourceKind,
    pub(crate) href: Option<String>,
    pub(crate) links: Vec<Link>,
    pub(crate) attributes: Map<String, Value>,
    pub(crate) associations: BTreeMap<String, Accessor>,
    pub(crate) actions: Vec<String>,
    pub(crate) verbs: Verbs,
    pub(crate) raw: Value,
}

impl Resource {
    /// Returns the content-type tag this resource was built from.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the kind selected by the content-type tag.
    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    /// Returns the resource's own address, taken from its `self` link.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Returns the links of the envelope, without the `self` link.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns every attribute.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns one attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns a string attribute.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Returns the association names.
    pub fn associations(&self) -> impl Iterator<Item = &str> {
        self.associations.keys().map(String::as_str)
    }

    /// Returns the accessor bound to an association.
    pub fn association(&self, name: &str) -> Option<&Accessor> {
        self.associations.get(name)
    }

    /// Returns the server-declared action names.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Returns `true` if the resource declares the action.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.iter().any(|a| a == name)
    }

    /// Returns `true` if [`destroy`](Self::destroy) is available.
    pub fn can_destroy(&self) -> bool {
        self.verbs.destroy
    }

    /// Returns `true` if [`update`](Self::update) is available.
    pub fn can_update(&self) -> bool {
        self.verbs.update
    }

    /// Returns the envelope exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Lists every name [`call`](Self::call) accepts.
    pub fn api_methods(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.associations().collect();
        names.extend(self.actions.iter().map(String::as_str));
        if self.verbs.destroy {
            names.push("destroy");
        }
        if self.verbs.update {
            names.push("update");
        }
        if self.verbs.live_tasks {
            names.push("live_tasks");
        }
        names.extend(self.attributes.keys().map(String::as_str));
        names
    }

    /// Invokes an association.
    pub fn follow(&self, name: &str, params: Params) -> Result<Node, Error> {
        self.associations
            .get(name)
            .ok_or_else(|| Error::unsupported(name))?
            .invoke(&self.client, params)
    }

    /// Performs a server-declared action as `POST href/action`.
    pub fn perform(&self, action: &str, params: Params) -> Result<Node, Error> {
        if !self.has_action(action) {
            return Err(Error::unsupported(action));
        }
        let href = self.require_href(action)?;
        self.client.do_post(&format!("{}/{}", href, action), params)
    }

    /// Deletes the resource.
    pub fn destroy(&self) -> Result<(), Error> {
        self.destroy_response().map(|_| ())
    }

    /// Updates the resource with the given parameters.
    pub fn update(&self, params: Params) -> Result<(), Error> {
        self.update_response(params).map(|_| ())
    }

    /// Fetches the live tasks of an instance.
    pub fn live_tasks(&self, params: Params) -> Result<Node, Error> {
        if !self.verbs.live_tasks {
            return Err(Error::unsupported("live_tasks"));
        }
        let href = self.require_href("live_tasks")?;
        self.client
            .resource(&format!("{}/live/tasks", href), params)
    }

    /// Dispatches any name listed by [`api_methods`](Self::api_methods).
    ///
    /// Associations take precedence, then actions, then the standard verbs,
    /// then attributes (returned as [`Node::Json`]).
    pub fn call(&self, name: &str, params: Params) -> Result<Node, Error> {
        if self.associations.contains_key(name) {
            return self.follow(name, params);
        }
        if self.has_action(name) {
            return self.perform(name, params);
        }
        match name {
            "destroy" if self.verbs.destroy => self.destroy_response().map(Node::Response),
            "update" if self.verbs.update => self.update_response(params).map(Node::Response),
            "live_tasks" if self.verbs.live_tasks => self.live_tasks(params),
            _ => self
                .attributes
                .get(name)
                .cloned()
                .map(Node::Json)
                .ok_or_else(|| Error::unsupported(name)),
        }
    }

    fn destroy_response(&self) -> Result<HttpResponse, Error> {
        if !self.verbs.destroy {
            return Err(Error::unsupported("destroy"));
        }
        let href = self.require_href("destroy")?;
        self.client.do_delete(href)
    }

    fn update_response(&self, params: Params) -> Result<HttpResponse, Error> {
        if !self.verbs.update {
            return Err(Error::unsupported("update"));
        }
        let href = self.require_href("update")?;
        self.client.do_put(href, params)
    }

    fn require_href(&self, operation: &str) -> Result<&str, Error> {
        self.href.as_deref().ok_or_else(|| {
            Error::malformed(format!(
                "{} on a {} requires a self link",
                operation, self.resource_type
            ))
        })
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Resource");
        debug.field("resource_type", &self.resource_type);
        if let Some(ref href) = self.href {
            debug.field("href", href);
        }
        if let Some(name) = self.attributes.get("name") {
            debug.field("name", name);
        }
        if let Some(uid) = self.attributes.get("resource_uid") {
            debug.field("resource_uid", uid);
        }
        debug.finish_non_exhaustive()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Resource resource_type={:?}", self.resource_type)?;
        if let Some(name) = self.attributes.get("name") {
            write!(f, ", name={}", name)?;
        }
        if let Some(uid) = self.attributes.get("resource_uid") {
            write!(f, ", resource_uid={}", uid)?;
        }
        f.write_str(">")
    }
}

/// Structural equality: the client handle is not compared.
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.resource_type == other.resource_type
            && self.href == other.href
            && self.links == other.links
            && self.attributes == other.attributes
            && self.associations == other.associations
            && self.actions == other.actions
            && self.verbs == other.verbs
            && self.raw == other.raw
    }
}
