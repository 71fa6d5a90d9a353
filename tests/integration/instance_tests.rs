//! Clients authenticated with an instance token.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use right_api::transport::{HttpMethod, HttpResponse, MockTransport};
use right_api::{Client, Credentials, ErrorKind, InstanceTokenCredentials, Params};
use serde_json::json;

use crate::common;

fn instance_api() -> Arc<MockTransport> {
    let mock = Arc::new(MockTransport::new());
    mock.on(
        HttpMethod::Post,
        "/api/session/instance",
        HttpResponse::new(204).with_header("Set-Cookie", "_session_id=inst; path=/"),
    );
    mock
}

fn instance_client(mock: &Arc<MockTransport>) -> Client {
    common::init_tracing();
    Client::builder()
        .credentials(Credentials::instance_token("0123abcd"))
        .transport(mock.clone())
        .build()
        .unwrap()
}

#[test]
fn test_login_uses_instance_path_and_binds_fixed_roots() {
    let mock = instance_api();
    let client = instance_client(&mock);

    assert!(client.is_instance_token());
    assert_eq!(mock.request_count(), 1);
    let login = mock.last_request().unwrap();
    assert_eq!(login.path, "/api/session/instance");
    assert_eq!(login.body.as_deref(), Some("instance_token=0123abcd"));

    assert_eq!(client.api_methods(), vec!["backups", "clouds", "get_instance"]);
    assert_eq!(
        client.session().unwrap_err().kind(),
        ErrorKind::UnsupportedOperation
    );
}

#[test]
fn test_instance_token_with_account() {
    let mock = instance_api();
    let _client = Client::builder()
        .credentials(InstanceTokenCredentials::new("0123abcd").with_account_id("55"))
        .transport(mock.clone())
        .build()
        .unwrap();
    assert_eq!(
        mock.last_request().unwrap().body.as_deref(),
        Some("instance_token=0123abcd&account_href=%2Fapi%2Faccounts%2F55")
    );
}

#[test]
fn test_get_instance() {
    let mock = instance_api();
    let client = instance_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/session/instance",
        HttpResponse::resource(200, "instance", &common::instance_body(1, "AB")),
    );

    let instance = client.get_instance().unwrap();
    assert_eq!(instance.href(), Some("/api/clouds/1/instances/AB"));
    assert!(instance.can_update());
    assert!(!instance.can_destroy());
    assert_eq!(
        mock.last_request().unwrap().header("Cookie"),
        Some("_session_id=inst")
    );
}

#[test]
fn test_restricted_clouds() {
    let mock = instance_api();
    let client = instance_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/clouds/1/volumes?filter[]=name%3D%3Ddata",
        HttpResponse::resource(200, "volume", &json!([{"name": "data"}])),
    );
    mock.on(
        HttpMethod::Get,
        "/api/clouds/1/instances/AB/live/tasks/ae-1",
        HttpResponse::resource(200, "live_task", &json!({"summary": "running"})),
    );
    mock.clear_requests();

    let cloud = client
        .follow("clouds", Params::new().id("1"))
        .unwrap()
        .into_dummy()
        .unwrap();
    assert_eq!(cloud.path(), "/api/clouds/1");
    assert_eq!(mock.request_count(), 0);

    let volumes = cloud
        .call("volumes", Params::new().filter("name==data"))
        .unwrap()
        .into_collection()
        .unwrap();
    assert_eq!(volumes.len(), 1);
    assert_eq!(volumes.api_methods(), vec!["create"]);

    let instance = cloud
        .call("instances", Params::new().id("AB"))
        .unwrap()
        .into_dummy()
        .unwrap();
    assert_eq!(instance.path(), "/api/clouds/1/instances/AB");
    assert_eq!(instance.api_methods(), vec!["live_tasks"]);

    let task = instance
        .call("live_tasks", Params::new().id("ae-1"))
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(task.attribute_str("summary"), Some("running"));

    let err = cloud.call("images", Params::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
}

#[test]
fn test_restricted_clouds_without_id() {
    let mock = instance_api();
    let client = instance_client(&mock);

    let clouds = client.follow("clouds", Params::new()).unwrap().into_dummy().unwrap();
    assert_eq!(clouds.path(), "/api/clouds");
    assert_eq!(
        clouds.api_methods(),
        vec![
            "volumes",
            "volume_types",
            "volume_attachments",
            "volume_snapshots",
            "instances"
        ]
    );
}

#[test]
fn test_backups_create() {
    let mock = instance_api();
    let client = instance_client(&mock);
    mock.on(
        HttpMethod::Post,
        "/api/backups",
        HttpResponse::new(202).with_header("Location", "/api/backups/77"),
    );
    mock.on(
        HttpMethod::Get,
        "/api/backups/77",
        HttpResponse::resource(
            200,
            "backup",
            &json!({"name": "nightly", "links": [{"rel": "self", "href": "/api/backups/77"}]}),
        ),
    );

    let backups = client.follow("backups", Params::new()).unwrap().into_dummy().unwrap();
    let backup = backups
        .call(
            "create",
            Params::new().set("backup", json!({"lineage": "db-prod", "name": "nightly"})),
        )
        .unwrap()
        .into_resource()
        .unwrap();
    assert!(backup.can_destroy());
    assert_eq!(backup.attribute_str("name"), Some("nightly"));

    let post = mock
        .requests()
        .into_iter()
        .find(|r| r.method == HttpMethod::Post && r.path == "/api/backups")
        .unwrap();
    assert_eq!(
        post.body.as_deref(),
        Some("backup[lineage]=db-prod&backup[name]=nightly")
    );
}
