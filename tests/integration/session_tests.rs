//! Login, root binding and session renewal.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use right_api::transport::{HttpMethod, HttpResponse, MockTransport};
use right_api::{Accessor, Client, Credentials, ErrorKind, Params, SessionToken};

use crate::common::{self, ACCOUNT, EMAIL, PASSWORD};

#[test]
fn test_build_logs_in_and_binds_session_links() {
    let mock = common::user_api();
    let client = common::user_client(&mock);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);

    let login = &requests[0];
    assert_eq!(login.method, HttpMethod::Post);
    assert_eq!(login.path, "/api/session");
    assert_eq!(login.header("X-API-Version"), Some("1.5"));
    assert_eq!(
        login.body.as_deref(),
        Some("email=ops%40example.com&password=s3cret&account_href=%2Fapi%2Faccounts%2F1234")
    );

    let session = &requests[1];
    assert_eq!(session.method, HttpMethod::Get);
    assert_eq!(session.path, "/api/session");
    assert_eq!(session.header("Cookie"), Some("_session_id=s1"));
    assert_eq!(session.header("Accept"), Some("application/json"));

    assert_eq!(
        client.api_methods(),
        vec![
            "backups",
            "clouds",
            "deployments",
            "server_arrays",
            "servers",
            "session",
            "tags"
        ]
    );
    assert!(client.root("self").is_none());
    assert_eq!(
        client.root("tags"),
        Some(&Accessor::Tags {
            href: "/api/tags".into()
        })
    );
    assert_eq!(client.login_count(), 1);
    assert!(!client.is_instance_token());
    assert_eq!(client.to_string(), "#<RightApiClient>");
}

#[test]
fn test_session_accessor_fetches_session_resource() {
    let mock = common::user_api();
    let client = common::user_client(&mock);

    let session = client.session().unwrap();
    assert_eq!(session.resource_type(), "session");
    assert_eq!(session.href(), Some("/api/session"));
    assert_eq!(mock.count(HttpMethod::Get, "/api/session"), 2);
}

#[test]
fn test_session_token_skips_login() {
    let mock = common::user_api();
    let token: SessionToken = "_session_id=reused".parse().unwrap();

    let client = Client::builder()
        .credentials(Credentials::password(EMAIL, PASSWORD, ACCOUNT))
        .session_token(token.clone())
        .transport(mock.clone())
        .build()
        .unwrap();

    assert_eq!(mock.count(HttpMethod::Post, "/api/session"), 0);
    assert_eq!(client.session_token(), token);
    assert_eq!(
        mock.last_request().unwrap().header("Cookie"),
        Some("_session_id=reused")
    );
}

#[test]
fn test_login_rejected() {
    let mock = Arc::new(MockTransport::new());
    mock.on(
        HttpMethod::Post,
        "/api/session",
        HttpResponse::new(401).with_body("Invalid credentials"),
    );

    let err = Client::builder()
        .credentials(Credentials::password(EMAIL, "wrong", ACCOUNT))
        .transport(mock.clone())
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body(), Some("Invalid credentials"));
    assert_eq!(mock.request_count(), 1);
}

#[test]
fn test_old_api_version_rejected_before_any_request() {
    let mock = common::user_api();
    let err = Client::builder()
        .api_version("1.0")
        .credentials(Credentials::password(EMAIL, PASSWORD, ACCOUNT))
        .transport(mock.clone())
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.message().contains("1.5"));
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_incomplete_credentials_rejected() {
    let mock = common::user_api();
    let err = Client::builder()
        .credentials(Credentials::password(EMAIL, PASSWORD, ""))
        .transport(mock.clone())
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_api_version_header_follows_config() {
    let mock = common::user_api();
    let _client = Client::builder()
        .api_version("1.6")
        .credentials(Credentials::password(EMAIL, PASSWORD, ACCOUNT))
        .transport(mock.clone())
        .build()
        .unwrap();

    for request in mock.requests() {
        assert_eq!(request.header("X-API-Version"), Some("1.6"));
    }
}

#[test]
fn test_403_renews_session_and_replays_once() {
    let mock = common::user_api();
    let client = common::user_client(&mock);

    mock.on(HttpMethod::Post, "/api/session", common::login_ok("s2"));
    mock.on(
        HttpMethod::Get,
        "/api/deployments/1",
        HttpResponse::new(403).with_body("Session cookie is expired or invalid"),
    );
    mock.on(
        HttpMethod::Get,
        "/api/deployments/1",
        HttpResponse::resource(200, "deployment", &common::deployment_body(1)),
    );
    mock.clear_requests();

    let deployment = client
        .resource("/api/deployments/1", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(deployment.attribute_str("name"), Some("deployment-1"));

    let requests = mock.requests();
    let trace: Vec<(HttpMethod, &str)> = requests
        .iter()
        .map(|r| (r.method, r.path.as_str()))
        .collect();
    assert_eq!(
        trace,
        vec![
            (HttpMethod::Get, "/api/deployments/1"),
            (HttpMethod::Post, "/api/session"),
            (HttpMethod::Get, "/api/deployments/1"),
        ]
    );
    assert_eq!(requests[0].header("Cookie"), Some("_session_id=s1"));
    assert_eq!(requests[2].header("Cookie"), Some("_session_id=s2"));
    assert_eq!(client.login_count(), 2);
    assert_eq!(client.session_token().get("_session_id"), Some("s2"));
}

#[test]
fn test_second_403_is_terminal() {
    let mock = common::user_api();
    let client = common::user_client(&mock);

    mock.on(
        HttpMethod::Delete,
        "/api/deployments/1",
        HttpResponse::new(403).with_body("Permission denied"),
    );
    mock.clear_requests();

    let err = client.do_delete("/api/deployments/1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.body(), Some("Permission denied"));

    assert_eq!(mock.count(HttpMethod::Delete, "/api/deployments/1"), 2);
    assert_eq!(mock.count(HttpMethod::Post, "/api/session"), 1);
    assert_eq!(mock.request_count(), 3);
}

#[test]
fn test_403_during_post_replays_body() {
    let mock = common::user_api();
    let client = common::user_client(&mock);

    mock.on(HttpMethod::Post, "/api/deployments/1/clone", HttpResponse::new(403));
    mock.on(HttpMethod::Post, "/api/deployments/1/clone", HttpResponse::new(204));
    mock.clear_requests();

    client
        .do_post("/api/deployments/1/clone", Params::new().set("name", "copy"))
        .unwrap();

    let posts: Vec<_> = mock
        .requests()
        .into_iter()
        .filter(|r| r.path == "/api/deployments/1/clone")
        .collect();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].body, posts[1].body);
    assert_eq!(posts[1].body.as_deref(), Some("name=copy"));
}

#[test]
fn test_failed_renewal_surfaces_login_error() {
    let mock = common::user_api();
    let client = common::user_client(&mock);

    mock.on(
        HttpMethod::Post,
        "/api/session",
        HttpResponse::new(500).with_body("maintenance"),
    );
    mock.on(HttpMethod::Get, "/api/clouds", HttpResponse::new(403));

    let err = client.follow("clouds", Params::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status(), Some(500));
    assert_eq!(mock.count(HttpMethod::Get, "/api/clouds"), 1);
}

#[test]
fn test_token_only_client_cannot_renew() {
    let mock = common::user_api();
    let client = Client::builder()
        .session_token("_session_id=stale".parse().unwrap())
        .transport(mock.clone())
        .build()
        .unwrap();

    mock.on(
        HttpMethod::Get,
        "/api/clouds",
        HttpResponse::new(403).with_body("session expired"),
    );
    let err = client.follow("clouds", Params::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.body(), Some("session expired"));
    assert_eq!(mock.count(HttpMethod::Post, "/api/session"), 0);
    assert_eq!(mock.count(HttpMethod::Get, "/api/clouds"), 1);
}

#[test]
fn test_clones_share_renewed_session() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    let clone = client.clone();

    mock.on(HttpMethod::Post, "/api/session", common::login_ok("s2"));
    mock.on(HttpMethod::Get, "/api/clouds", HttpResponse::new(403));
    mock.on(
        HttpMethod::Get,
        "/api/clouds",
        HttpResponse::resource(200, "cloud", &serde_json::json!([])),
    );

    clone.follow("clouds", Params::new()).unwrap();
    assert_eq!(client.session_token().get("_session_id"), Some("s2"));
    assert_eq!(client.login_count(), 2);
}

#[test]
fn test_unknown_root_is_unsupported() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.clear_requests();

    let err = client.follow("volumes", Params::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert!(client.get_instance().is_err());
    assert_eq!(mock.request_count(), 0);
}
