//! DirtCloud REST client
//!
//! Transport layer for the DirtCloud backend: owns the base address, the
//! Bearer credential and the timeout policy, executes requests and turns
//! non-success responses into a classified [`ClientError`].
//!
//! # Example
//!
//! ```ignore
//! use dirtcloud_client::{Client, model::Project};
//! use dirtcloud_config::ProviderConfig;
//!
//! let config = ProviderConfig::resolve(None, None)?;
//! let client = Client::new(&config)?;
//!
//! let project: Project = client.get("/projects/p-123").await?;
//! let named = client.list_projects(Some("web")).await?;
//! ```

pub mod client;
pub mod error;
pub mod model;

pub use client::{Client, Response};
pub use error::{ClientError, RemoteError, Result, classify};
pub use model::{
    Bucket, CreateBucketRequest, CreateInstanceRequest, CreateMetadataRequest,
    CreateObjectRequest, CreateProjectRequest, Instance, InstanceFilter, InstanceStatus, Metadata,
    Object, Project, Sensitive, UpdateBucketRequest, UpdateInstanceRequest, UpdateMetadataRequest,
    UpdateObjectRequest, UpdateProjectRequest,
};

// Re-exported so callers can build raw requests without a direct reqwest dependency
pub use reqwest::{Method, StatusCode};
