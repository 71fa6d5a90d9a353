//! The four verbs every navigation step reduces to.

use serde_json::Value;

use super::Client;
use super::inner::ClientInner;
use crate::resource::{Node, ResourceFactory};
use crate::transport::{HttpMethod, HttpResponse};
use crate::types::Params;
use crate::Error;

/// A decoded GET response, before resources are built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    /// Decoded JSON body.
    pub data: Value,
    /// Resource type from the vendor media type, or `""` if there was none.
    pub resource_type: String,
    /// The path actually requested, query string included.
    pub path: String,
}

impl ClientInner {
    /// GET that expects 200 and a JSON body.
    pub(crate) fn fetch(&self, path: &str, params: Params) -> Result<Fetched, Error> {
        let path = get_path(path, params);
        let response = self.send(HttpMethod::Get, &path, None)?;
        if response.status != 200 {
            return Err(Error::unexpected_status(response.status, response.body));
        }

        let resource_type = self.resource_type_of(&response);
        let data = serde_json::from_str(&response.body).map_err(|e| {
            Error::malformed(format!("GET {} returned invalid JSON: {}", path, e))
                .with_status(response.status)
                .with_body(response.body.clone())
                .with_source(e)
        })?;

        Ok(Fetched {
            data,
            resource_type,
            path,
        })
    }
}

impl Client {
    /// Performs a GET without building resources.
    ///
    /// `params.id` is appended to the path; filters and other parameters
    /// become the query string. Anything but a 200 fails with
    /// [`ErrorKind::UnexpectedStatus`](crate::ErrorKind::UnexpectedStatus).
    pub fn do_get(&self, path: &str, params: Params) -> Result<Fetched, Error> {
        self.inner.fetch(path, params)
    }

    /// Fetches `path` and builds the result.
    ///
    /// ```rust,ignore
    /// let deployment = client.resource("/api/deployments/42", Params::new())?;
    /// ```
    pub fn resource(&self, path: &str, params: Params) -> Result<Node, Error> {
        let fetched = self.do_get(path, params)?;
        ResourceFactory::new(self).process(fetched.data, &fetched.resource_type, &fetched.path)
    }

    /// Performs a POST with form-encoded parameters.
    ///
    /// - 201/202: fetches the `Location` and returns the built resource
    /// - 200 with a vendor media type: returns the built body
    /// - any other 2xx: returns the raw response
    pub fn do_post(&self, path: &str, params: Params) -> Result<Node, Error> {
        let form = params.to_form();
        let response = self.inner.send(HttpMethod::Post, path, Some(&form))?;

        match response.status {
            201 | 202 => {
                let location = response.location().ok_or_else(|| {
                    Error::malformed(format!(
                        "POST {} returned {} without a Location header",
                        path, response.status
                    ))
                    .with_status(response.status)
                })?;
                let location = self.inner.relative_location(location).to_string();
                self.resource(&location, Params::new())
            }
            200 => {
                let resource_type = self.inner.resource_type_of(&response);
                if resource_type.is_empty() {
                    return Ok(Node::Response(response));
                }
                let data = serde_json::from_str(&response.body).map_err(|e| {
                    Error::malformed(format!("POST {} returned invalid JSON: {}", path, e))
                        .with_status(response.status)
                        .with_body(response.body.clone())
                        .with_source(e)
                })?;
                ResourceFactory::new(self).process(data, &resource_type, path)
            }
            status if (200..300).contains(&status) => Ok(Node::Response(response)),
            status => Err(Error::unexpected_status(status, response.body)),
        }
    }

    /// Performs a PUT with form-encoded parameters; expects 204.
    pub fn do_put(&self, path: &str, params: Params) -> Result<HttpResponse, Error> {
        let form = params.to_form();
        let response = self.inner.send(HttpMethod::Put, path, Some(&form))?;
        expect_status(response, 204)
    }

    /// Performs a DELETE; expects 200.
    pub fn do_delete(&self, path: &str) -> Result<HttpResponse, Error> {
        let response = self.inner.send(HttpMethod::Delete, path, None)?;
        expect_status(response, 200)
    }
}

fn expect_status(response: HttpResponse, expected: u16) -> Result<HttpResponse, Error> {
    if response.status == expected {
        Ok(response)
    } else {
        Err(Error::unexpected_status(response.status, response.body))
    }
}

/// Builds the GET path: id segment, then query string.
///
/// A trailing `&` and then a trailing `?` are trimmed, so empty parameters
/// leave the path untouched.
pub(crate) fn get_path(path: &str, mut params: Params) -> String {
    let mut path = path.to_string();
    if let Some(id) = params.take_id() {
        path.push('/');
        path.push_str(&id);
    }

    path.push(if path.contains('?') { '&' } else { '?' });
    path.push_str(&params.to_query());

    if path.ends_with('&') {
        path.pop();
    }
    if path.ends_with('?') {
        path.pop();
    }
    path
}
