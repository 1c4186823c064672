//! Read-only lookups
//!
//! Look up existing backend entities without managing them.

use crate::error::Result;
use crate::reconciler::Reconciler;
use crate::resources::MetadataResource;
use dirtcloud_client::{Client, Instance, InstanceFilter, Metadata, Project};

#[derive(Debug, Clone)]
pub struct DataSources {
    client: Client,
}

impl DataSources {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn project(&self, id: &str) -> Result<Project> {
        tracing::debug!("Reading project {}", id);
        Ok(self.client.get(&format!("/projects/{}", id)).await?)
    }

    pub async fn instance(&self, id: &str) -> Result<Instance> {
        tracing::debug!("Reading instance {}", id);
        Ok(self.client.get(&format!("/instances/{}", id)).await?)
    }

    /// Metadata entry whose path matches exactly
    pub async fn metadata(&self, path: &str) -> Result<Metadata> {
        Reconciler::<MetadataResource>::new(self.client.clone())
            .get_by_path(path)
            .await
    }

    /// All projects, or only those named `name`
    pub async fn projects_named(&self, name: Option<&str>) -> Result<Vec<Project>> {
        Ok(self.client.list_projects(name).await?)
    }

    pub async fn instances(&self, filter: &InstanceFilter) -> Result<Vec<Instance>> {
        Ok(self.client.list_instances(filter).await?)
    }
}
