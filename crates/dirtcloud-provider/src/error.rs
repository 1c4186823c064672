//! Reconciler error types

use dirtcloud_client::ClientError;
use thiserror::Error;

/// Reconciler errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Desired values rejected locally, before any request was sent
    #[error("invalid {resource}: {message}")]
    Validation {
        resource: &'static str,
        message: String,
    },

    /// Guarded bucket delete refused because the bucket still holds objects
    #[error(
        "bucket {bucket_id} contains {object_count} object(s); set force_destroy=true to delete non-empty buckets"
    )]
    BucketNotEmpty {
        bucket_id: String,
        object_count: usize,
    },

    #[error("malformed {resource} import identifier '{id}': expected {expected}")]
    MalformedIdentifier {
        resource: &'static str,
        id: String,
        expected: &'static str,
    },

    /// An immutable field differs; the resource has to be destroyed and recreated
    #[error("{resource} {key}: changing {} requires replacement", .fields.join(", "))]
    RequiresReplacement {
        resource: &'static str,
        key: String,
        fields: Vec<&'static str>,
    },

    /// A derived lookup (e.g. metadata by path) found no exact match
    #[error("{resource} not found: {lookup}")]
    NotFound {
        resource: &'static str,
        lookup: String,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ProviderError {
    pub fn validation(resource: &'static str, message: impl Into<String>) -> Self {
        ProviderError::Validation {
            resource,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::NotFound { .. } => true,
            ProviderError::Client(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// True for errors raised before the transport was touched
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ProviderError::Validation { .. }
                | ProviderError::MalformedIdentifier { .. }
                | ProviderError::RequiresReplacement { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
