mod common;

use common::*;
use dirtcloud_provider::{
    InstanceReconciler, InstanceSpec, MetadataReconciler, MetadataSpec, ObjectKey,
    ObjectReconciler, ObjectSpec, ProjectReconciler, ProjectSpec, ProviderError, Refreshed,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_entity(
    backend: &TestBackend,
    collection: &str,
    entity_path: &str,
    body: serde_json::Value,
) {
    Mock::given(method("POST"))
        .and(path(collection))
        .respond_with(ResponseTemplate::new(201).set_body_json(body.clone()))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(entity_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&backend.server)
        .await;
}

async fn mount_gone(backend: &TestBackend, entity_path: &str) {
    backend.server.reset().await;
    Mock::given(method("GET"))
        .and(path(entity_path))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found("resource not found")))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(entity_path))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found("resource not found")))
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_project_create_refresh_destroy() {
    let backend = TestBackend::start().await;
    mount_entity(&backend, "/v1/projects", "/v1/projects/p-1", project_json("p-1", "web")).await;
    Mock::given(method("DELETE"))
        .and(path("/v1/projects/p-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&backend.server)
        .await;

    let projects = ProjectReconciler::new(backend.client());
    let created = projects.create(&ProjectSpec::new("web")).await.unwrap();
    assert_eq!(created.id, "p-1");

    let refreshed = projects.refresh(&created.id).await.unwrap();
    assert_eq!(refreshed, Refreshed::Current(created.clone()));

    projects.destroy(&created.id).await.unwrap();
    assert_eq!(backend.count("DELETE", "/v1/projects/p-1").await, 1);

    mount_gone(&backend, "/v1/projects/p-1").await;
    assert!(projects.refresh(&created.id).await.unwrap().is_gone());
    let err = projects.read(&created.id).await.unwrap_err();
    assert!(err.is_not_found());

    // already gone: still success
    projects.destroy(&created.id).await.unwrap();
    projects.destroy(&created.id).await.unwrap();
}

#[tokio::test]
async fn test_instance_create_sends_defaults() {
    let backend = TestBackend::start().await;
    let body = instance_json("i-1", "p-1", "web", 2, "ubuntu:20.04");

    Mock::given(method("POST"))
        .and(path("/v1/instances"))
        .and(body_json(serde_json::json!({
            "project_id": "p-1",
            "name": "web",
            "cpu": 2,
            "memory_mb": 2048,
            "image": "ubuntu:20.04",
            "status": "running"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(body.clone()))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/instances/i-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&backend.server)
        .await;

    let instances = InstanceReconciler::new(backend.client());
    let created = instances.create(&InstanceSpec::new("p-1", "web")).await.unwrap();

    match instances.refresh(&created.id).await.unwrap() {
        Refreshed::Current(current) => assert_eq!(current, created),
        Refreshed::Gone => panic!("instance should exist"),
    }

    mount_gone(&backend, "/v1/instances/i-1").await;
    assert!(instances.refresh(&created.id).await.unwrap().is_gone());
    instances.destroy(&created.id).await.unwrap();
}

#[tokio::test]
async fn test_metadata_create_refresh_destroy() {
    let backend = TestBackend::start().await;
    mount_entity(
        &backend,
        "/v1/metadata",
        "/v1/metadata/m-1",
        metadata_json("m-1", "app/env", "prod"),
    )
    .await;

    let metadata = MetadataReconciler::new(backend.client());
    let created = metadata
        .create(&MetadataSpec::new("app/env", "prod"))
        .await
        .unwrap();
    let current = metadata.refresh(&created.id).await.unwrap().into_current();
    assert_eq!(current, Some(created.clone()));

    mount_gone(&backend, "/v1/metadata/m-1").await;
    metadata.destroy(&created.id).await.unwrap();
    assert!(metadata.refresh(&created.id).await.unwrap().is_gone());
}

#[tokio::test]
async fn test_object_create_refresh_destroy() {
    let backend = TestBackend::start().await;
    mount_entity(
        &backend,
        "/v1/buckets/bkt1/objects",
        "/v1/buckets/bkt1/objects/obj1",
        object_json("obj1", "bkt1", "docs/a.txt", "YWJj"),
    )
    .await;

    let objects = ObjectReconciler::new(backend.client());
    let created = objects
        .create(&ObjectSpec::new("bkt1", "docs/a.txt", "YWJj"))
        .await
        .unwrap();

    let requests = backend.server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({ "path": "docs/a.txt", "content": "YWJj" })
    );

    let key = ObjectKey::new("bkt1", "obj1");
    let current = objects.refresh(&key).await.unwrap().into_current();
    assert_eq!(current, Some(created));

    mount_gone(&backend, "/v1/buckets/bkt1/objects/obj1").await;
    objects.destroy(&key).await.unwrap();
    assert!(objects.refresh(&key).await.unwrap().is_gone());
}

#[tokio::test]
async fn test_validation_fails_before_transport() {
    let backend = TestBackend::start().await;
    let client = backend.client();

    let err = ObjectReconciler::new(client.clone())
        .create(&ObjectSpec::new("bkt1", "a.txt", "abc"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation { .. }));

    let err = ProjectReconciler::new(client.clone())
        .create(&ProjectSpec::new(""))
        .await
        .unwrap_err();
    assert!(err.is_local());

    let err = InstanceReconciler::new(client)
        .create(&InstanceSpec::new("p-1", "web").with_memory_mb(0))
        .await
        .unwrap_err();
    assert!(err.is_local());

    assert_eq!(backend.total_requests().await, 0);
}

#[tokio::test]
async fn test_refresh_propagates_other_errors() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/p-1"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "internal", "message": "db down" })),
        )
        .mount(&backend.server)
        .await;

    let err = ProjectReconciler::new(backend.client())
        .refresh(&"p-1".to_string())
        .await
        .unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("db down"));
}
