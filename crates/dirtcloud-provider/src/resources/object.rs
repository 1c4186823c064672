use crate::action::Change;
use crate::error::{ProviderError, Result};
use crate::resource::{Resource, is_path_segment};
use crate::validation;
use dirtcloud_client::{CreateObjectRequest, Object, Sensitive, UpdateObjectRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const IMPORT_FORMAT: &str = "'{bucket_id}/{object_id}'";

/// Identity of an object: objects are only addressable through their bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub bucket_id: String,
    pub id: String,
}

impl ObjectKey {
    pub fn new(bucket_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket_id, self.id)
    }
}

impl FromStr for ObjectKey {
    type Err = ProviderError;

    /// Parses `"{bucket_id}/{object_id}"`: exactly one '/', both halves non-empty
    /// and free of '?', '#' and '%'
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ProviderError::MalformedIdentifier {
            resource: ObjectResource::KIND,
            id: s.to_string(),
            expected: IMPORT_FORMAT,
        };

        let (bucket_id, id) = s.split_once('/').ok_or_else(malformed)?;
        if !is_path_segment(bucket_id) || !is_path_segment(id) {
            return Err(malformed());
        }
        Ok(Self::new(bucket_id, id))
    }
}

/// Desired object values. `bucket_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub bucket_id: String,
    pub path: String,
    /// Base64-encoded payload
    pub content: Sensitive,
}

impl ObjectSpec {
    pub fn new(
        bucket_id: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<Sensitive>,
    ) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectResource;

impl Resource for ObjectResource {
    const KIND: &'static str = "object";

    type Entity = Object;
    type Spec = ObjectSpec;
    type Key = ObjectKey;
    type CreateRequest = CreateObjectRequest;
    type UpdateRequest = UpdateObjectRequest;
    type DestroyPolicy = ();

    fn validate_spec(&self, spec: &ObjectSpec) -> Result<()> {
        validation::non_empty(Self::KIND, "bucket_id", &spec.bucket_id)?;
        validation::object_path(&spec.path)?;
        validation::base64_content(spec.content.expose())
    }

    fn validate_update(&self, update: &UpdateObjectRequest) -> Result<()> {
        if let Some(path) = &update.path {
            validation::object_path(path)?;
        }
        if let Some(content) = &update.content {
            validation::base64_content(content.expose())?;
        }
        Ok(())
    }

    fn create_path(&self, spec: &ObjectSpec) -> String {
        format!("/buckets/{}/objects", spec.bucket_id)
    }

    fn entity_path(&self, key: &ObjectKey) -> String {
        format!("/buckets/{}/objects/{}", key.bucket_id, key.id)
    }

    fn key_of(&self, entity: &Object) -> ObjectKey {
        ObjectKey::new(entity.bucket_id.clone(), entity.id.clone())
    }

    fn create_request(&self, spec: &ObjectSpec) -> CreateObjectRequest {
        CreateObjectRequest {
            path: spec.path.clone(),
            content: spec.content.clone(),
        }
    }

    fn diff(&self, observed: &Object, desired: &ObjectSpec) -> Change<UpdateObjectRequest> {
        if observed.bucket_id != desired.bucket_id {
            return Change::Replace {
                fields: vec!["bucket_id"],
            };
        }

        let update = UpdateObjectRequest {
            path: (observed.path != desired.path).then(|| desired.path.clone()),
            content: (observed.content != desired.content).then(|| desired.content.clone()),
        };

        if update == UpdateObjectRequest::default() {
            Change::NoOp
        } else {
            Change::Update(update)
        }
    }

    fn parse_import_id(&self, raw: &str) -> Result<ObjectKey> {
        raw.parse()
    }
}
