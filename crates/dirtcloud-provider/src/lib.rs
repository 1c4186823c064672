//! DirtCloud resource reconciliation
//!
//! Maps desired resource state onto DirtCloud CRUD calls. Each resource type
//! (project, instance, metadata, bucket, object) implements [`Resource`];
//! the create / refresh / update / destroy / import state machine is written
//! once in [`Reconciler`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        orchestrator / `dirt` CLI             │
//! └──────────────────┬───────────────────────────┘
//!                    │ desired + observed state
//! ┌──────────────────▼───────────────────────────┐
//! │              dirtcloud-provider              │
//! │  Reconciler<R>   plan / reconcile            │
//! │  ┌────────┐┌────────┐┌────────┐┌──────┐┌───┐ │
//! │  │project ││instance││metadata││bucket││obj│ │
//! │  └────────┘└────────┘└────────┘└──────┘└───┘ │
//! └──────────────────┬───────────────────────────┘
//!                    │
//! ┌──────────────────▼───────────────────────────┐
//! │   dirtcloud-client (REST, Bearer, 30s)       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dirtcloud_provider::{BucketReconciler, BucketSpec, Refreshed};
//!
//! let buckets = BucketReconciler::new(client.clone());
//! let spec = BucketSpec::new("assets").with_force_destroy(false);
//! let bucket = buckets.create(&spec).await?;
//!
//! if let Refreshed::Current(current) = buckets.refresh(&bucket.id).await? {
//!     buckets.destroy_with(&current.id, &spec.destroy_policy()).await?;
//! }
//! ```

pub mod action;
pub mod data_source;
pub mod error;
pub mod reconciler;
pub mod resource;
pub mod resources;
pub mod validation;

// Re-exports
pub use action::{ActionType, Change, Reconciled};
pub use data_source::DataSources;
pub use error::{ProviderError, Result};
pub use reconciler::{Reconciler, Refreshed};
pub use resource::{MissingPolicy, Resource};
pub use resources::{
    BucketDestroyPolicy, BucketReconciler, BucketResource, BucketSpec, InstanceReconciler,
    InstanceResource, InstanceSpec, MetadataReconciler, MetadataResource, MetadataSpec, ObjectKey,
    ObjectReconciler, ObjectResource, ObjectSpec, ProjectReconciler, ProjectResource, ProjectSpec,
};
