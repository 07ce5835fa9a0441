//! End-to-end lifecycle against a mock GetMac API.

use getmac::{CreateVirtualMachineRequest, Error, GetmacClient, InstanceId, ProjectId};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn vm_json(id: &str, name: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "image": "ubuntu-24.04",
        "region": "eu-west",
        "type": "m1.small",
        "status": status,
        "status_reason": "",
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

async fn mount_api(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/instances"))
        .and(query_param("project_id", "proj-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vm_json("vm-1", "web-1", "pending")))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instances"))
        .and(query_param("project_id", "proj-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "instances": [vm_json("vm-1", "web-1", "running")]
        })))
        .mount(server)
        .await;

    for action in ["start", "stop"] {
        Mock::given(method("POST"))
            .and(path(format!("/instances/vm-1/{action}")))
            .and(query_param("project_id", "proj-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(server)
            .await;
    }

    Mock::given(method("DELETE"))
        .and(path("/instances/vm-1"))
        .and(query_param("project_id", "proj-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instances/vm-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_lifecycle() {
    let server = MockServer::start().await;
    mount_api(&server).await;

    let client = GetmacClient::builder()
        .with_base_url(server.uri())
        .with_token("lifecycle-token")
        .build()
        .unwrap();
    let project = ProjectId::from("proj-1");
    let vms = client.virtual_machines();

    let request = CreateVirtualMachineRequest::new("web-1", "ubuntu-24.04", "eu-west", "m1.small");
    let created = vms.create(&project, &request).await.unwrap();
    assert_eq!(created.id, InstanceId::from("vm-1"));

    let found = vms.get_by_name(&project, "web-1").await.unwrap();
    assert_eq!(found.id, created.id);
    assert!(found.is_running());

    vms.start(&project, &created.id).await.unwrap();
    vms.stop(&project, &created.id).await.unwrap();
    vms.delete(&project, &created.id).await.unwrap();

    let err = vms.get(&project, &created.id).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn every_request_carries_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(header("authorization", "Bearer lifecycle-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0,
            "instances": []
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = GetmacClient::builder()
        .with_base_url(server.uri())
        .with_token("lifecycle-token")
        .build()
        .unwrap();
    let project = ProjectId::from("proj-1");

    assert!(client.virtual_machines().list(&project).await.unwrap().is_empty());
    client
        .virtual_machines()
        .start(&project, &InstanceId::from("vm-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn clones_serve_concurrent_callers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "instances": [vm_json("vm-1", "web-1", "running")]
        })))
        .expect(4)
        .mount(&server)
        .await;

    let client = GetmacClient::builder()
        .with_base_url(server.uri())
        .build()
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move {
                let project = ProjectId::from("proj-1");
                client.virtual_machines().list(&project).await
            })
        })
        .collect();

    for handle in handles {
        let vms = handle.await.unwrap().unwrap();
        assert_eq!(vms.len(), 1);
    }
}

#[tokio::test]
async fn get_by_name_ignores_partial_and_case_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "instances": [vm_json("a", "Missing", "running"), vm_json("b", "missing-2", "running")]
        })))
        .mount(&server)
        .await;

    let client = GetmacClient::builder()
        .with_base_url(server.uri())
        .build()
        .unwrap();
    let err = client
        .virtual_machines()
        .get_by_name(&ProjectId::from("proj-1"), "missing")
        .await
        .unwrap_err();

    match err {
        Error::NotFound { name, response } => {
            assert_eq!(name, "missing");
            assert!(response.text().contains("missing-2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_token_sends_bare_bearer_scheme() {
    let server = MockServer::start().await;
    // HTTP parsers may strip trailing whitespace from header values, so the
    // exact "Bearer " value is asserted on the built request in getmac-core.
    Mock::given(method("GET"))
        .and(path("/instances"))
        .and(|request: &wiremock::Request| {
            request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.trim_end() == "Bearer")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0,
            "instances": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GetmacClient::builder()
        .with_base_url(server.uri())
        .build()
        .unwrap();

    let vms = client
        .virtual_machines()
        .list(&ProjectId::from("proj-1"))
        .await
        .unwrap();
    assert!(vms.is_empty());
}
