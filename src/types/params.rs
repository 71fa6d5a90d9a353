//! Call parameters and their query/form encodings.

use serde_json::{Map, Value};

use crate::Error;

/// Parameters passed to an accessor, action or verb.
///
/// Two keys are special:
/// - `id` is appended to the path of a GET as an extra segment.
/// - `filters` is an ordered list rendered as repeated `filter[]=` entries,
///   placed before every other query parameter.
///
/// Everything else is an ordinary parameter, kept in insertion order.
/// Nested objects and arrays are encoded with bracket notation
/// (`deployment[name]=x`, `tags[]=a`).
///
/// ```rust
/// use right_api::Params;
///
/// let params = Params::new()
///     .filter("name==web")
///     .set("view", "extended");
/// assert_eq!(params.to_query(), "filter[]=name%3D%3Dweb&view=extended");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    id: Option<String>,
    filters: Vec<String>,
    fields: Map<String, Value>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the id path segment.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends a filter expression.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filters.push(expression.into());
        self
    }

    /// Sets an ordinary parameter.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets an ordinary parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the id, if set.
    pub fn id_segment(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the filter expressions in order.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Returns an ordinary parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns `true` when no id, filter or parameter is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.filters.is_empty() && self.fields.is_empty()
    }

    /// Removes and returns the id.
    pub(crate) fn take_id(&mut self) -> Option<String> {
        self.id.take()
    }

    /// Renders the query string (without the leading `?`).
    ///
    /// Filters come first; ordinary parameters follow in insertion order.
    /// The id is not part of the query string.
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<String> = self
            .filters
            .iter()
            .map(|f| format!("filter[]={}", urlencoding::encode(f)))
            .collect();
        pairs.extend(self.encoded_fields());
        pairs.join("&")
    }

    /// Renders a form-encoded request body.
    ///
    /// The id, when set, is sent as an ordinary `id` field.
    pub fn to_form(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(ref id) = self.id {
            pairs.push(format!("id={}", urlencoding::encode(id)));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|f| format!("filter[]={}", urlencoding::encode(f))),
        );
        pairs.extend(self.encoded_fields());
        pairs.join("&")
    }

    fn encoded_fields(&self) -> Vec<String> {
        let mut flat = Vec::new();
        for (key, value) in &self.fields {
            flatten(urlencoding::encode(key).into_owned(), value, &mut flat);
        }
        flat.into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect()
    }
}

/// Flattens a JSON value into bracket-notation pairs.
fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let name = format!("{}[{}]", prefix, urlencoding::encode(key));
                flatten(name, nested, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten(format!("{}[]", prefix), item, out);
            }
        }
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Null => out.push((prefix, String::new())),
        other => out.push((prefix, other.to_string())),
    }
}

impl TryFrom<Value> for Params {
    type Error = Error;

    /// Builds parameters from a JSON object, recognizing `id` and `filters`.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(Error::configuration("parameters must be a JSON object"));
        };

        let id = match fields.shift_remove("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(_) => return Err(Error::configuration("`id` must be a string or number")),
        };

        let filters = match fields.shift_remove("filters") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(Error::configuration("`filters` must be a list of strings")),
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(Error::configuration("`filters` must be a list of strings")),
        };

        Ok(Self {
            id,
            filters,
            fields,
        })
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        let mut params = Params::new();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        params
    }
}
