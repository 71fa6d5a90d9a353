//! Builds resources and collections from decoded response bodies.

use serde_json::{Map, Value};

use super::item::Verbs;
use super::{
    Accessor, CapabilityTable, CollectionMethod, Node, Resource, ResourceCollection, ResourceKind,
    bind_links,
};
use crate::types::{Action, Link, SELF_REL};
use crate::{Client, Error};

/// Turns `(payload, resource_type, path)` into navigable values.
///
/// Construction is all-or-nothing: a malformed envelope anywhere in the
/// payload fails the whole call with
/// [`ErrorKind::MalformedResponse`](crate::ErrorKind::MalformedResponse).
pub(crate) struct ResourceFactory<'a> {
    client: &'a Client,
    table: &'a CapabilityTable,
}

impl<'a> ResourceFactory<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            table: client.capabilities(),
        }
    }

    /// Builds a collection for arrays and a resource for objects.
    ///
    /// An empty `resource_type` means the response carried no vendor type;
    /// the payload is returned as opaque JSON.
    pub(crate) fn process(&self, data: Value, resource_type: &str, path: &str) -> Result<Node, Error> {
        if resource_type.is_empty() {
            return Ok(Node::Json(data));
        }
        match data {
            Value::Array(items) => self
                .collection(items, resource_type, path)
                .map(Node::Collection),
            Value::Object(_) => self.build(data, resource_type).map(Node::Resource),
            other => Err(Error::malformed(format!(
                "expected an object or array for {}, got {}",
                resource_type, other
            ))),
        }
    }

    fn collection(
        &self,
        items: Vec<Value>,
        resource_type: &str,
        path: &str,
    ) -> Result<ResourceCollection, Error> {
        let items = items
            .into_iter()
            .map(|item| self.build(item, resource_type))
            .collect::<Result<Vec<_>, _>>()?;

        let mut methods = Vec::new();
        if self.table.can_create(resource_type) {
            methods.push(CollectionMethod::Create);
        }
        match ResourceKind::from_type(resource_type) {
            ResourceKind::Instance => {
                methods.push(CollectionMethod::MultiTerminate);
                methods.push(CollectionMethod::MultiRunExecutable);
            }
            ResourceKind::Input => methods.push(CollectionMethod::MultiUpdate),
            _ => {}
        }

        Ok(ResourceCollection {
            client: self.client.clone(),
            resource_type: resource_type.to_string(),
            path: path.to_string(),
            items,
            methods,
        })
    }

    /// Builds a single resource from an envelope object.
    pub(crate) fn build(&self, data: Value, resource_type: &str) -> Result<Resource, Error> {
        let raw = data.clone();
        let Value::Object(mut fields) = data else {
            return Err(Error::malformed(format!(
                "{} envelope is not an object",
                resource_type
            )));
        };

        let links: Vec<Link> = take_list(&mut fields, "links", resource_type)?;
        let actions: Vec<Action> = take_list(&mut fields, "actions", resource_type)?;

        let (self_links, links): (Vec<Link>, Vec<Link>) =
            links.into_iter().partition(Link::is_self);
        if self_links.len() > 1 {
            return Err(Error::malformed(format!(
                "{} envelope has {} self links",
                resource_type,
                self_links.len()
            )));
        }
        let href = self_links.into_iter().next().and_then(|link| link.href);

        let mut associations = bind_links(&links);
        let actions: Vec<String> = actions
            .into_iter()
            .map(|action| action.rel)
            .filter(|rel| !associations.contains_key(rel))
            .collect();

        let mut attributes = Map::new();
        for (key, value) in fields {
            if associations.contains_key(&key) {
                if embedded_instance_href(&value).is_some() {
                    let child = self.build(value, "instance")?;
                    associations.insert(key, Accessor::Embedded(Box::new(child)));
                }
            } else if !actions.contains(&key) {
                attributes.insert(key, value);
            }
        }

        let kind = ResourceKind::from_type(resource_type);
        let verbs = Verbs {
            destroy: self.table.can_destroy(resource_type),
            update: self.table.can_update(resource_type),
            live_tasks: kind == ResourceKind::Instance,
        };

        Ok(Resource {
            client: self.client.clone(),
            resource_type: resource_type.to_string(),
            kind,
            href,
            links,
            attributes,
            associations,
            actions,
            verbs,
            raw,
        })
    }
}

/// Removes a list field, treating absence and `null` as empty.
fn take_list<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    resource_type: &str,
) -> Result<Vec<T>, Error>
where
    T: serde::de::DeserializeOwned,
{
    match fields.shift_remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|e| {
            Error::malformed(format!("invalid {} in {} envelope: {}", key, resource_type, e))
                .with_source(e)
        }),
    }
}

/// Returns the self href of a value that embeds a full instance.
fn embedded_instance_href(value: &Value) -> Option<&str> {
    value
        .get("links")?
        .as_array()?
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some(SELF_REL))?
        .get("href")?
        .as_str()
        .filter(|href| href.contains("instance"))
}
