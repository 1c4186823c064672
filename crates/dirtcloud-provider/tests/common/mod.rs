use dirtcloud_client::Client;
use dirtcloud_config::ProviderConfig;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TIMESTAMP: &str = "2025-01-01T00:00:00Z";

pub struct TestBackend {
    pub server: MockServer,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn client(&self) -> Client {
        let config =
            ProviderConfig::new(format!("{}/v1", self.server.uri()), Some("test-token".to_string()))
                .unwrap();
        Client::new(&config).unwrap()
    }

    /// Number of received requests with this method and path
    #[allow(dead_code)]
    pub async fn count(&self, method: &str, path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == method && r.url.path() == path)
            .count()
    }

    #[allow(dead_code)]
    pub async fn total_requests(&self) -> usize {
        self.server.received_requests().await.unwrap().len()
    }
}

#[allow(dead_code)]
pub fn not_found(message: &str) -> Value {
    json!({ "error": "not_found", "message": message })
}

#[allow(dead_code)]
pub fn project_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP
    })
}

#[allow(dead_code)]
pub fn instance_json(id: &str, project_id: &str, name: &str, cpu: u32, image: &str) -> Value {
    json!({
        "id": id,
        "project_id": project_id,
        "name": name,
        "cpu": cpu,
        "memory_mb": 2048,
        "image": image,
        "status": "running",
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP
    })
}

#[allow(dead_code)]
pub fn metadata_json(id: &str, path: &str, value: &str) -> Value {
    json!({
        "id": id,
        "path": path,
        "value": value,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP
    })
}

#[allow(dead_code)]
pub fn bucket_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP
    })
}

#[allow(dead_code)]
pub fn object_json(id: &str, bucket_id: &str, path: &str, content: &str) -> Value {
    json!({
        "id": id,
        "bucket_id": bucket_id,
        "path": path,
        "content": content,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP
    })
}
