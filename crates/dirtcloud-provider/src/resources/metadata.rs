use crate::action::Change;
use crate::error::{ProviderError, Result};
use crate::reconciler::Reconciler;
use crate::resource::{Resource, parse_plain_id};
use crate::validation;
use dirtcloud_client::{CreateMetadataRequest, Metadata, UpdateMetadataRequest};
use serde::{Deserialize, Serialize};

/// Desired metadata entry. `path` is unique across all entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSpec {
    pub path: String,
    pub value: String,
}

impl MetadataSpec {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataResource;

impl Resource for MetadataResource {
    const KIND: &'static str = "metadata";

    type Entity = Metadata;
    type Spec = MetadataSpec;
    type Key = String;
    type CreateRequest = CreateMetadataRequest;
    type UpdateRequest = UpdateMetadataRequest;
    type DestroyPolicy = ();

    fn validate_spec(&self, spec: &MetadataSpec) -> Result<()> {
        validation::non_empty(Self::KIND, "path", &spec.path)
    }

    fn validate_update(&self, update: &UpdateMetadataRequest) -> Result<()> {
        match &update.path {
            Some(path) => validation::non_empty(Self::KIND, "path", path),
            None => Ok(()),
        }
    }

    fn create_path(&self, _spec: &MetadataSpec) -> String {
        "/metadata".to_string()
    }

    fn entity_path(&self, key: &String) -> String {
        format!("/metadata/{}", key)
    }

    fn key_of(&self, entity: &Metadata) -> String {
        entity.id.clone()
    }

    fn create_request(&self, spec: &MetadataSpec) -> CreateMetadataRequest {
        CreateMetadataRequest {
            path: spec.path.clone(),
            value: spec.value.clone(),
        }
    }

    fn diff(&self, observed: &Metadata, desired: &MetadataSpec) -> Change<UpdateMetadataRequest> {
        let update = UpdateMetadataRequest {
            path: (observed.path != desired.path).then(|| desired.path.clone()),
            value: (observed.value != desired.value).then(|| desired.value.clone()),
        };

        if update == UpdateMetadataRequest::default() {
            Change::NoOp
        } else {
            Change::Update(update)
        }
    }

    fn parse_import_id(&self, raw: &str) -> Result<String> {
        parse_plain_id(Self::KIND, raw)
    }
}

impl Reconciler<MetadataResource> {
    /// Look up the single entry whose path equals `path` exactly.
    ///
    /// The backend only filters by prefix, so `a/b` also returns `a/b/c`;
    /// the exact match is picked out of the listing here.
    pub async fn get_by_path(&self, path: &str) -> Result<Metadata> {
        validation::non_empty(MetadataResource::KIND, "path", path)?;

        tracing::debug!("Looking up metadata by path {}", path);
        let entries = self.client().list_metadata(Some(path)).await?;

        entries
            .into_iter()
            .find(|entry| entry.path == path)
            .ok_or_else(|| ProviderError::NotFound {
                resource: MetadataResource::KIND,
                lookup: format!("path {}", path),
            })
    }
}
