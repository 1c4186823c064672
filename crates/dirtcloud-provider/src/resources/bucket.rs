use crate::action::Change;
use crate::error::{ProviderError, Result};
use crate::resource::{MissingPolicy, Resource, parse_plain_id};
use crate::validation;
use async_trait::async_trait;
use dirtcloud_client::{Bucket, Client, CreateBucketRequest, UpdateBucketRequest};
use serde::{Deserialize, Serialize};

fn default_force_destroy() -> bool {
    true
}

/// Desired bucket values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub name: String,
    /// Delete the bucket even if it still holds objects. Never sent to the backend.
    #[serde(default = "default_force_destroy")]
    pub force_destroy: bool,
}

impl BucketSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            force_destroy: true,
        }
    }

    pub fn with_force_destroy(mut self, force_destroy: bool) -> Self {
        self.force_destroy = force_destroy;
        self
    }

    pub fn destroy_policy(&self) -> BucketDestroyPolicy {
        BucketDestroyPolicy::from(self)
    }
}

/// Deletion guard for buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDestroyPolicy {
    pub force_destroy: bool,
}

impl Default for BucketDestroyPolicy {
    fn default() -> Self {
        Self {
            force_destroy: true,
        }
    }
}

impl From<&BucketSpec> for BucketDestroyPolicy {
    fn from(spec: &BucketSpec) -> Self {
        Self {
            force_destroy: spec.force_destroy,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BucketResource;

#[async_trait]
impl Resource for BucketResource {
    const KIND: &'static str = "bucket";

    type Entity = Bucket;
    type Spec = BucketSpec;
    type Key = String;
    type CreateRequest = CreateBucketRequest;
    type UpdateRequest = UpdateBucketRequest;
    type DestroyPolicy = BucketDestroyPolicy;

    fn validate_spec(&self, spec: &BucketSpec) -> Result<()> {
        validation::bucket_name(&spec.name)
    }

    fn validate_update(&self, update: &UpdateBucketRequest) -> Result<()> {
        match &update.name {
            Some(name) => validation::bucket_name(name),
            None => Ok(()),
        }
    }

    fn create_path(&self, _spec: &BucketSpec) -> String {
        "/buckets".to_string()
    }

    fn entity_path(&self, key: &String) -> String {
        format!("/buckets/{}", key)
    }

    fn key_of(&self, entity: &Bucket) -> String {
        entity.id.clone()
    }

    fn create_request(&self, spec: &BucketSpec) -> CreateBucketRequest {
        CreateBucketRequest {
            name: spec.name.clone(),
        }
    }

    fn diff(&self, observed: &Bucket, desired: &BucketSpec) -> Change<UpdateBucketRequest> {
        if observed.name == desired.name {
            return Change::NoOp;
        }
        Change::Update(UpdateBucketRequest {
            name: Some(desired.name.clone()),
        })
    }

    fn parse_import_id(&self, raw: &str) -> Result<String> {
        parse_plain_id(Self::KIND, raw)
    }

    fn missing_on_refresh(&self) -> MissingPolicy {
        MissingPolicy::Propagate
    }

    /// Refuse to delete a non-empty bucket unless `force_destroy` is set
    async fn before_destroy(
        &self,
        client: &Client,
        key: &String,
        policy: &BucketDestroyPolicy,
    ) -> Result<()> {
        if policy.force_destroy {
            return Ok(());
        }

        let objects = match client.list_objects(key).await {
            Ok(objects) => objects,
            // A missing bucket holds nothing; the delete call settles it
            Err(e) if e.is_not_found() => {
                tracing::debug!("bucket {} not found while checking contents", key);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        if !objects.is_empty() {
            tracing::warn!(
                "Refusing to delete bucket {}: {} object(s) remain",
                key,
                objects.len()
            );
            return Err(ProviderError::BucketNotEmpty {
                bucket_id: key.clone(),
                object_count: objects.len(),
            });
        }
        Ok(())
    }
}
