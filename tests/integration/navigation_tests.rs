//! Following links, actions and verbs from the root collections.

#![allow(clippy::unwrap_used)]

use right_api::transport::{HttpMethod, HttpResponse};
use right_api::{Accessor, CollectionMethod, ErrorKind, Node, Params, ResourceKind};
use serde_json::json;

use crate::common;

#[test]
fn test_index_and_create_deployment() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/deployments",
        HttpResponse::resource(
            200,
            "deployment",
            &json!([common::deployment_body(1), common::deployment_body(2)]),
        ),
    );
    mock.on(
        HttpMethod::Post,
        "/api/deployments",
        HttpResponse::new(201).with_header("Location", "/api/deployments/3"),
    );
    mock.on(
        HttpMethod::Get,
        "/api/deployments/3",
        HttpResponse::resource(200, "deployment", &common::deployment_body(3)),
    );

    let deployments = client
        .follow("deployments", Params::new())
        .unwrap()
        .into_collection()
        .unwrap();
    assert_eq!(deployments.len(), 2);
    assert_eq!(deployments.methods(), [CollectionMethod::Create]);
    let names: Vec<_> = deployments
        .iter()
        .map(|d| d.attribute_str("name").unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["deployment-1", "deployment-2"]);

    let created = deployments
        .create(Params::new().set("deployment", json!({"name": "deployment-3"})))
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(created.kind(), &ResourceKind::Deployment);
    assert_eq!(created.href(), Some("/api/deployments/3"));
}

#[test]
fn test_show_by_id_and_follow_association() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/servers/1",
        HttpResponse::resource(200, "server", &common::server_body(1)),
    );
    mock.on(
        HttpMethod::Get,
        "/api/deployments/9",
        HttpResponse::resource(200, "deployment", &common::deployment_body(9)),
    );

    let server = client
        .follow("servers", Params::new().id("1"))
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(server.attribute_str("state"), Some("operational"));
    assert!(server.attribute("deployment").is_none());
    assert!(server.attribute("href").is_none());

    let deployment = server
        .follow("deployment", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(deployment.attribute_str("name"), Some("deployment-9"));

    let debug = format!("{:?}", server);
    assert!(debug.contains("resource_type: \"server\""));
    assert!(debug.contains("web-1"));
    assert!(debug.contains("uid-1"));
    assert_eq!(
        server.to_string(),
        r#"#<Resource resource_type="server", name="web-1", resource_uid="uid-1">"#
    );
}

#[test]
fn test_missing_self_link_blocks_href_verbs() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/deployments/1",
        HttpResponse::resource(200, "deployment", &json!({"name": "orphan"})),
    );

    let deployment = client
        .resource("/api/deployments/1", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    assert!(deployment.href().is_none());
    mock.clear_requests();

    let err = deployment.destroy().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_multi_href_association_returns_one_result_per_href() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    let array = json!({
        "name": "workers",
        "links": [
            {"rel": "self", "href": "/api/server_arrays/4"},
            {"rel": "alert_specs", "href": "/api/server_arrays/4/alert_specs"},
            {"rel": "alert_specs", "href": "/api/alert_specs?subject=4"}
        ]
    });
    mock.on(
        HttpMethod::Get,
        "/api/server_arrays/4",
        HttpResponse::resource(200, "server_array", &array),
    );
    mock.on(
        HttpMethod::Get,
        "/api/server_arrays/4/alert_specs",
        HttpResponse::resource(200, "alert_spec", &json!([{"name": "cpu"}])),
    );
    mock.on(
        HttpMethod::Get,
        "/api/alert_specs?subject=4",
        HttpResponse::resource(200, "alert_spec", &json!([])),
    );

    let server_array = client
        .resource("/api/server_arrays/4", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    let results = server_array
        .follow("alert_specs", Params::new())
        .unwrap()
        .into_many()
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_collection().unwrap().len(), 1);
    assert!(results[1].as_collection().unwrap().is_empty());
    assert_eq!(
        results[1].as_collection().unwrap().path(),
        "/api/alert_specs?subject=4"
    );
}

#[test]
fn test_actions_and_verbs() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/servers/1",
        HttpResponse::resource(200, "server", &common::server_body(1)),
    );
    mock.on(
        HttpMethod::Post,
        "/api/servers/1/terminate",
        HttpResponse::new(204),
    );
    mock.on(HttpMethod::Put, "/api/servers/1", HttpResponse::new(204));
    mock.on(HttpMethod::Delete, "/api/servers/1", HttpResponse::new(200));

    let server = client
        .resource("/api/servers/1", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(
        server.api_methods(),
        vec![
            "alert_specs",
            "current_instance",
            "deployment",
            "launch",
            "terminate",
            "destroy",
            "update",
            "name",
            "resource_uid",
            "state"
        ]
    );

    server.perform("terminate", Params::new()).unwrap();
    server
        .update(Params::new().set("server", json!({"name": "web-2"})))
        .unwrap();
    assert_eq!(
        mock.last_request().unwrap().body.as_deref(),
        Some("server[name]=web-2")
    );
    server.destroy().unwrap();

    assert_eq!(mock.count(HttpMethod::Post, "/api/servers/1/terminate"), 1);
    assert_eq!(mock.count(HttpMethod::Put, "/api/servers/1"), 1);
    assert_eq!(mock.count(HttpMethod::Delete, "/api/servers/1"), 1);
}

#[test]
fn test_call_dispatches_by_name() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/servers/1",
        HttpResponse::resource(200, "server", &common::server_body(1)),
    );
    mock.on(HttpMethod::Post, "/api/servers/1/launch", HttpResponse::new(204));
    mock.on(HttpMethod::Delete, "/api/servers/1", HttpResponse::new(200));

    let server = client
        .resource("/api/servers/1", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(
        server.call("name", Params::new()).unwrap().into_json().unwrap(),
        json!("web-1")
    );
    assert!(matches!(
        server.call("launch", Params::new()).unwrap(),
        Node::Response(_)
    ));
    assert!(matches!(
        server.call("destroy", Params::new()).unwrap(),
        Node::Response(_)
    ));

    let err = server.call("reboot", Params::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert!(err.message().contains("reboot"));
}

#[test]
fn test_unsupported_verbs_send_nothing() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/deployments/1/inputs",
        HttpResponse::resource(200, "input", &json!([{"name": "PORT", "value": "text:80"}])),
    );

    let inputs = client
        .resource("/api/deployments/1/inputs", Params::new())
        .unwrap()
        .into_collection()
        .unwrap();
    let input = inputs.get(0).unwrap();
    mock.clear_requests();

    assert_eq!(input.destroy().unwrap_err().kind(), ErrorKind::UnsupportedOperation);
    assert_eq!(
        input.update(Params::new()).unwrap_err().kind(),
        ErrorKind::UnsupportedOperation
    );
    assert_eq!(
        input.perform("launch", Params::new()).unwrap_err().kind(),
        ErrorKind::UnsupportedOperation
    );
    assert_eq!(
        inputs.create(Params::new()).unwrap_err().kind(),
        ErrorKind::UnsupportedOperation
    );
    assert_eq!(
        input.live_tasks(Params::new()).unwrap_err().kind(),
        ErrorKind::UnsupportedOperation
    );
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_inputs_multi_update() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/deployments/1/inputs",
        HttpResponse::resource(200, "input", &json!([])),
    );
    mock.on(
        HttpMethod::Put,
        "/api/deployments/1/inputs/multi_update",
        HttpResponse::new(204),
    );

    let inputs = client
        .resource("/api/deployments/1/inputs", Params::new())
        .unwrap()
        .into_collection()
        .unwrap();
    inputs
        .multi_update(Params::new().set("inputs", json!({"PORT": "text:8080"})))
        .unwrap();
    assert_eq!(
        mock.last_request().unwrap().body.as_deref(),
        Some("inputs[PORT]=text%3A8080")
    );
}

#[test]
fn test_instance_collection_multi_actions_keep_query() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/clouds/1/instances?filter[]=state%3D%3Doperational",
        HttpResponse::resource(200, "instance", &json!([common::instance_body(1, "AB")])),
    );
    mock.on(
        HttpMethod::Post,
        "/api/clouds/1/instances/multi_terminate?filter[]=state%3D%3Doperational",
        HttpResponse::new(202).with_header("Location", "/api/clouds/1/instances/AB"),
    );
    mock.on(
        HttpMethod::Get,
        "/api/clouds/1/instances/AB",
        HttpResponse::resource(200, "instance", &common::instance_body(1, "AB")),
    );

    let instances = client
        .resource(
            "/api/clouds/1/instances",
            Params::new().filter("state==operational"),
        )
        .unwrap()
        .into_collection()
        .unwrap();
    assert_eq!(
        instances.api_methods(),
        vec!["multi_terminate", "multi_run_executable"]
    );

    let terminated = instances
        .multi_terminate(Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(terminated.kind(), &ResourceKind::Instance);
}

#[test]
fn test_instance_live_tasks() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/clouds/1/instances/AB",
        HttpResponse::resource(200, "instance", &common::instance_body(1, "AB")),
    );
    mock.on(
        HttpMethod::Get,
        "/api/clouds/1/instances/AB/live/tasks/ae-1",
        HttpResponse::resource(200, "live_task", &json!({"summary": "completed"})),
    );

    let instance = client
        .resource("/api/clouds/1/instances/AB", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    let task = instance
        .live_tasks(Params::new().id("ae-1"))
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(task.attribute_str("summary"), Some("completed"));
}

#[test]
fn test_embedded_instance_needs_no_request() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    let mut body = common::server_body(1);
    body["current_instance"] = common::instance_body(1, "AB");
    mock.on(
        HttpMethod::Get,
        "/api/servers/1?view=instance_detail",
        HttpResponse::resource(200, "server", &body),
    );

    let server = client
        .resource("/api/servers/1", Params::new().set("view", "instance_detail"))
        .unwrap()
        .into_resource()
        .unwrap();
    assert!(matches!(
        server.association("current_instance"),
        Some(Accessor::Embedded(_))
    ));
    mock.clear_requests();

    let instance = server
        .follow("current_instance", Params::new())
        .unwrap()
        .into_resource()
        .unwrap();
    assert_eq!(instance.attribute_str("name"), Some("instance-AB"));
    assert!(instance.has_action("reboot"));
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_tags_root_is_synthetic() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Post,
        "/api/tags/multi_add",
        HttpResponse::new(204),
    );
    mock.clear_requests();

    let tags = client.follow("tags", Params::new()).unwrap().into_dummy().unwrap();
    assert_eq!(mock.request_count(), 0);
    assert_eq!(
        tags.api_methods(),
        vec!["by_tag", "by_resource", "multi_add", "multi_delete"]
    );

    tags.call(
        "multi_add",
        Params::new()
            .set("resource_hrefs", json!(["/api/servers/1"]))
            .set("tags", json!(["env:prod"])),
    )
    .unwrap();
    assert_eq!(
        mock.last_request().unwrap().body.as_deref(),
        Some("resource_hrefs[]=%2Fapi%2Fservers%2F1&tags[]=env%3Aprod")
    );

    let err = tags.call("index", Params::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
}

#[test]
fn test_backups_root_is_dual_mode() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/backups?lineage=db-prod",
        HttpResponse::resource(200, "backup", &json!([])),
    );
    mock.on(
        HttpMethod::Post,
        "/api/backups/cleanup",
        HttpResponse::new(204),
    );

    let backups = client
        .follow("backups", Params::new().set("lineage", "db-prod"))
        .unwrap()
        .into_collection()
        .unwrap();
    assert_eq!(backups.resource_type(), "backup");
    assert!(backups.api_methods().is_empty());

    let dummy = client.follow("backups", Params::new()).unwrap().into_dummy().unwrap();
    assert_eq!(dummy.api_methods(), vec!["create", "cleanup"]);
    dummy
        .call("cleanup", Params::new().set("lineage", "db-prod").set("keep_last", 5))
        .unwrap();
    assert_eq!(mock.count(HttpMethod::Post, "/api/backups/cleanup"), 1);
    assert_eq!(
        mock.last_request().unwrap().body.as_deref(),
        Some("lineage=db-prod&keep_last=5")
    );
}

#[test]
fn test_resource_equality_is_structural() {
    let mock = common::user_api();
    let client = common::user_client(&mock);
    mock.on(
        HttpMethod::Get,
        "/api/servers/1",
        HttpResponse::resource(200, "server", &common::server_body(1)),
    );

    let first = client.resource("/api/servers/1", Params::new()).unwrap();
    let second = client.resource("/api/servers/1", Params::new()).unwrap();
    assert_eq!(first.as_resource(), second.as_resource());
    assert_eq!(mock.count(HttpMethod::Get, "/api/servers/1"), 2);
}
