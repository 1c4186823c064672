//! Resource definition trait
//!
//! Each DirtCloud resource type (project, instance, metadata, bucket, object)
//! describes itself through [`Resource`]: its wire types, how it is addressed,
//! how desired values map onto requests and which fields force replacement.
//! The CRUD state machine itself lives once in [`crate::Reconciler`].

use crate::action::Change;
use crate::error::Result;
use async_trait::async_trait;
use dirtcloud_client::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// What a refresh does when the backend no longer has the resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Report [`crate::Refreshed::Gone`] so the caller drops its record
    Drop,
    /// Surface the not-found error to the caller
    Propagate,
}

#[async_trait]
pub trait Resource: Send + Sync {
    /// Resource type name (e.g. "bucket"), used in errors and logs
    const KIND: &'static str;

    /// Entity as returned by the backend
    type Entity: DeserializeOwned + Clone + Send + Sync;

    /// Desired values declared by the caller
    type Spec: Send + Sync;

    /// Everything needed to address one entity
    type Key: fmt::Display + Send + Sync;

    type CreateRequest: Serialize + Send + Sync;
    type UpdateRequest: Serialize + Send + Sync;

    /// Local deletion policy; not stored by the backend
    type DestroyPolicy: Default + Send + Sync;

    fn validate_spec(&self, spec: &Self::Spec) -> Result<()>;

    fn validate_update(&self, update: &Self::UpdateRequest) -> Result<()>;

    /// Collection path that `POST` creates into
    fn create_path(&self, spec: &Self::Spec) -> String;

    fn entity_path(&self, key: &Self::Key) -> String;

    fn key_of(&self, entity: &Self::Entity) -> Self::Key;

    fn create_request(&self, spec: &Self::Spec) -> Self::CreateRequest;

    /// Compare observed against desired.
    ///
    /// Returns `Change::Replace` if any immutable field differs,
    /// `Change::Update` carrying only the differing mutable fields, or `Change::NoOp`.
    fn diff(&self, observed: &Self::Entity, desired: &Self::Spec) -> Change<Self::UpdateRequest>;

    /// Parse an opaque import identifier. Must not touch the network.
    fn parse_import_id(&self, raw: &str) -> Result<Self::Key>;

    fn missing_on_refresh(&self) -> MissingPolicy {
        MissingPolicy::Drop
    }

    /// Runs before the delete request; an error aborts the delete.
    async fn before_destroy(
        &self,
        _client: &Client,
        _key: &Self::Key,
        _policy: &Self::DestroyPolicy,
    ) -> Result<()> {
        Ok(())
    }
}

/// Characters that would change the meaning of the request URL if spliced into a path
const URL_RESERVED: [char; 4] = ['/', '?', '#', '%'];

/// True if `segment` can be placed in a URL path verbatim
pub(crate) fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(URL_RESERVED)
}

/// Import identifier for resources addressed by a single opaque id
pub(crate) fn parse_plain_id(resource: &'static str, raw: &str) -> Result<String> {
    if !is_path_segment(raw) {
        return Err(crate::ProviderError::MalformedIdentifier {
            resource,
            id: raw.to_string(),
            expected: "a non-empty id without '/', '?', '#' or '%'",
        });
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_id_accepts_opaque_ids() {
        assert_eq!(parse_plain_id("project", "p-1").unwrap(), "p-1");
        assert_eq!(parse_plain_id("project", "0f3a_B9").unwrap(), "0f3a_B9");
    }

    #[test]
    fn test_plain_id_rejects_url_reserved() {
        for raw in ["", "a/b", "p-1?name=x", "p-1#frag", "p%2F1"] {
            let err = parse_plain_id("project", raw).unwrap_err();
            assert!(
                matches!(err, crate::ProviderError::MalformedIdentifier { .. }),
                "{} should be malformed",
                raw
            );
        }
    }
}
