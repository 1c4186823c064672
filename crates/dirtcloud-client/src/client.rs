//! DirtCloud REST transport
//!
//! Single point of HTTP execution against the backend. Uses Bearer token
//! authentication, a fixed 30 second timeout and no retries: a failed
//! attempt is surfaced to the caller as-is.

use crate::error::{ClientError, Result, classify};
use crate::model::{Instance, InstanceFilter, Metadata, Object, Project};
use bytes::Bytes;
use dirtcloud_config::{ProviderConfig, REQUEST_TIMEOUT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const NO_BODY: Option<&()> = None;

/// Raw response of a single exchange
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: Bytes,
}

/// DirtCloud API client
///
/// Cloning is cheap and shares the underlying connection pool. The client
/// holds no mutable state, so one instance can serve any number of
/// concurrent reconcilers.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Client {
    /// Create a new client from a resolved provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_url: config.endpoint.clone(),
            token: config.token.clone(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Copy of this client whose requests are bounded by `deadline`.
    ///
    /// The fixed 30 second timeout still applies; the effective timeout is
    /// whichever is shorter.
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        Self {
            timeout: self.timeout.min(deadline),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute one request and return the raw status and body.
    ///
    /// Only transport failures are errors here; status codes are left to the caller.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, &[], body).await
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .timeout(self.timeout);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Transport)?;

        tracing::debug!("{} {} -> {}", method, url, status.as_u16());
        Ok(Response { status, body })
    }

    /// Execute and decode a JSON body, requiring exactly `expected` as status
    pub async fn expect_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body).await?;
        decode(response, expected)
    }

    /// Execute a request whose success response carries no body
    pub async fn expect_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self.execute(method, path, body).await?;
        if response.status != expected {
            return Err(classify(response.status, &response.body));
        }
        Ok(())
    }

    /// `GET path` expecting 200
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.expect_json(Method::GET, path, NO_BODY, StatusCode::OK)
            .await
    }

    /// `POST path` expecting 201
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.expect_json(Method::POST, path, Some(body), StatusCode::CREATED)
            .await
    }

    /// `PATCH path` expecting 200
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.expect_json(Method::PATCH, path, Some(body), StatusCode::OK)
            .await
    }

    /// `DELETE path` expecting 204
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.expect_empty(Method::DELETE, path, NO_BODY, StatusCode::NO_CONTENT)
            .await
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self.send(Method::GET, path, query, NO_BODY).await?;
        decode(response, StatusCode::OK)
    }

    // ========== List endpoints ==========

    /// List projects, optionally filtered by name
    pub async fn list_projects(&self, name: Option<&str>) -> Result<Vec<Project>> {
        let query: Vec<_> = name
            .filter(|n| !n.is_empty())
            .map(|n| ("name", n.to_string()))
            .into_iter()
            .collect();
        self.list("/projects", &query).await
    }

    /// List instances matching the filter
    pub async fn list_instances(&self, filter: &InstanceFilter) -> Result<Vec<Instance>> {
        self.list("/instances", &filter.query_pairs()).await
    }

    /// List metadata whose path starts with `prefix`.
    ///
    /// The backend only filters by prefix; results are not exact matches.
    pub async fn list_metadata(&self, prefix: Option<&str>) -> Result<Vec<Metadata>> {
        let query: Vec<_> = prefix
            .filter(|p| !p.is_empty())
            .map(|p| ("prefix", p.to_string()))
            .into_iter()
            .collect();
        self.list("/metadata", &query).await
    }

    /// List the objects stored in a bucket
    pub async fn list_objects(&self, bucket_id: &str) -> Result<Vec<Object>> {
        self.list(&format!("/buckets/{}/objects", bucket_id), &[])
            .await
    }
}

fn decode<T: DeserializeOwned>(response: Response, expected: StatusCode) -> Result<T> {
    if response.status != expected {
        return Err(classify(response.status, &response.body));
    }
    serde_json::from_slice(&response.body).map_err(ClientError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        let config = ProviderConfig::new("http://localhost:8080/v1", None).unwrap();
        Client::new(&config).unwrap()
    }

    #[test]
    fn test_deadline_composes_with_fixed_timeout() {
        let client = client();
        assert_eq!(client.timeout(), REQUEST_TIMEOUT);
        assert_eq!(
            client.with_deadline(Duration::from_secs(5)).timeout(),
            Duration::from_secs(5)
        );
        assert_eq!(
            client.with_deadline(Duration::from_secs(300)).timeout(),
            REQUEST_TIMEOUT
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let config =
            ProviderConfig::new("http://localhost:8080/v1", Some("tok-123".to_string())).unwrap();
        let client = Client::new(&config).unwrap();
        let printed = format!("{:?}", client);
        assert!(!printed.contains("tok-123"));
        assert!(printed.contains("authenticated: true"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
