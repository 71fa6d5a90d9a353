//! Mock transport implementation for testing.
//!
//! Responses are scripted per method and path; every request is recorded so
//! tests can assert on exactly what went over the wire.

use std::collections::VecDeque;

use parking_lot::RwLock;

use super::traits::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::Error;

struct MockRoute {
    method: HttpMethod,
    path: String,
    responses: VecDeque<HttpResponse>,
    last: Option<HttpResponse>,
}

/// In-memory transport with scripted responses.
///
/// Responses registered for the same method and path are each served once,
/// in order; once the queue is empty the last one served is repeated.
/// Responses queued later are served next. Unmatched requests get a 404.
///
/// ```rust
/// use right_api::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockTransport};
///
/// let mock = MockTransport::new();
/// mock.on(HttpMethod::Delete, "/api/deployments/1", HttpResponse::new(200));
///
/// let response = mock
///     .execute(&HttpRequest::new(HttpMethod::Delete, "/api/deployments/1"))
///     .unwrap();
/// assert_eq!(response.status, 200);
/// assert_eq!(mock.request_count(), 1);
/// ```
pub struct MockTransport {
    routes: RwLock<Vec<MockRoute>>,
    requests: RwLock<Vec<HttpRequest>>,
    failure: RwLock<Option<Error>>,
}

impl MockTransport {
    /// Creates a mock transport with no routes.
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
            requests: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    /// Queues a response for a method and exact path (including query).
    pub fn on(&self, method: HttpMethod, path: impl Into<String>, response: HttpResponse) -> &Self {
        let path = path.into();
        let mut routes = self.routes.write();
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.responses.push_back(response),
            None => routes.push(MockRoute {
                method,
                path,
                responses: VecDeque::from([response]),
                last: None,
            }),
        }
        self
    }

    /// Makes the next request fail with the given error.
    pub fn set_failure(&self, error: Error) {
        *self.failure.write() = Some(error);
    }

    /// Returns every request executed so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().clone()
    }

    /// Returns the number of requests executed.
    pub fn request_count(&self) -> usize {
        self.requests.read().len()
    }

    /// Returns the number of requests executed against a method and path.
    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests
            .read()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.read().last().cloned()
    }

    /// Forgets recorded requests, keeping routes.
    pub fn clear_requests(&self) {
        self.requests.write().clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        self.requests.write().push(request.clone());

        if let Some(error) = self.failure.write().take() {
            return Err(error);
        }

        let mut routes = self.routes.write();
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path);

        let response = route.and_then(|route| match route.responses.pop_front() {
            Some(next) => {
                route.last = Some(next.clone());
                Some(next)
            }
            None => route.last.clone(),
        });

        Ok(response.unwrap_or_else(|| {
            HttpResponse::new(404).with_body(format!(
                "no mock route for {} {}",
                request.method, request.path
            ))
        }))
    }
}
