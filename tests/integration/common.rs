//! Shared fixtures: a scripted API with a logged-in user session.

#![allow(clippy::unwrap_used, dead_code)]

use std::sync::{Arc, Once};

use right_api::transport::{HttpMethod, HttpResponse, MockTransport};
use right_api::{Client, Credentials};
use serde_json::{Value, json};

pub const EMAIL: &str = "ops@example.com";
pub const PASSWORD: &str = "s3cret";
pub const ACCOUNT: &str = "1234";

static TRACING: Once = Once::new();

/// Routes test logs through `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A login acknowledgement carrying one session cookie.
pub fn login_ok(session_id: &str) -> HttpResponse {
    HttpResponse::new(302)
        .with_header("Location", "/api/session")
        .with_header("Set-Cookie", format!("_session_id={}; path=/; HttpOnly", session_id))
}

/// The session resource linking the root collections.
pub fn session_body() -> Value {
    json!({
        "message": "You have successfully logged into the RightScale API.",
        "links": [
            {"rel": "self", "href": "/api/session"},
            {"rel": "clouds", "href": "/api/clouds"},
            {"rel": "deployments", "href": "/api/deployments"},
            {"rel": "servers", "href": "/api/servers"},
            {"rel": "server_arrays", "href": "/api/server_arrays"},
            {"rel": "tags", "href": "/api/tags"},
            {"rel": "backups", "href": "/api/backups"}
        ]
    })
}

/// A mock API that accepts the user login and serves the session.
pub fn user_api() -> Arc<MockTransport> {
    let mock = Arc::new(MockTransport::new());
    mock.on(HttpMethod::Post, "/api/session", login_ok("s1"));
    mock.on(
        HttpMethod::Get,
        "/api/session",
        HttpResponse::resource(200, "session", &session_body()),
    );
    mock
}

/// Builds a user client against the given mock.
pub fn user_client(mock: &Arc<MockTransport>) -> Client {
    init_tracing();
    Client::builder()
        .credentials(Credentials::password(EMAIL, PASSWORD, ACCOUNT))
        .transport(mock.clone())
        .build()
        .unwrap()
}

/// A server envelope with links and actions.
pub fn server_body(id: u32) -> Value {
    json!({
        "name": format!("web-{}", id),
        "resource_uid": format!("uid-{}", id),
        "state": "operational",
        "links": [
            {"rel": "self", "href": format!("/api/servers/{}", id)},
            {"rel": "deployment", "href": "/api/deployments/9"},
            {"rel": "current_instance", "href": "/api/clouds/1/instances/AB"},
            {"rel": "alert_specs", "href": format!("/api/servers/{}/alert_specs", id)}
        ],
        "actions": [{"rel": "launch"}, {"rel": "terminate"}]
    })
}

/// A deployment envelope.
pub fn deployment_body(id: u32) -> Value {
    json!({
        "name": format!("deployment-{}", id),
        "description": "",
        "links": [
            {"rel": "self", "href": format!("/api/deployments/{}", id)},
            {"rel": "servers", "href": format!("/api/deployments/{}/servers", id)},
            {"rel": "inputs", "href": format!("/api/deployments/{}/inputs", id)}
        ]
    })
}

/// An instance envelope.
pub fn instance_body(cloud: u32, id: &str) -> Value {
    json!({
        "name": format!("instance-{}", id),
        "links": [
            {"rel": "self", "href": format!("/api/clouds/{}/instances/{}", cloud, id)},
            {"rel": "cloud", "href": format!("/api/clouds/{}", cloud)}
        ],
        "actions": [{"rel": "reboot"}, {"rel": "run_executable"}]
    })
}
