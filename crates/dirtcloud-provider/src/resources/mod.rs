//! DirtCloud resource definitions

mod bucket;
mod instance;
mod metadata;
mod object;
mod project;

pub use bucket::{BucketDestroyPolicy, BucketResource, BucketSpec};
pub use instance::{DEFAULT_CPU, DEFAULT_IMAGE, DEFAULT_MEMORY_MB, InstanceResource, InstanceSpec};
pub use metadata::{MetadataResource, MetadataSpec};
pub use object::{ObjectKey, ObjectResource, ObjectSpec};
pub use project::{ProjectResource, ProjectSpec};

use crate::Reconciler;

pub type ProjectReconciler = Reconciler<ProjectResource>;
pub type InstanceReconciler = Reconciler<InstanceResource>;
pub type MetadataReconciler = Reconciler<MetadataResource>;
pub type BucketReconciler = Reconciler<BucketResource>;
pub type ObjectReconciler = Reconciler<ObjectResource>;
