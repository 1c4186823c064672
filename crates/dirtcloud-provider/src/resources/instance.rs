use crate::action::Change;
use crate::error::Result;
use crate::resource::{Resource, parse_plain_id};
use crate::validation;
use dirtcloud_client::{CreateInstanceRequest, Instance, InstanceStatus, UpdateInstanceRequest};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CPU: u32 = 2;
pub const DEFAULT_MEMORY_MB: u32 = 2048;
pub const DEFAULT_IMAGE: &str = "ubuntu:20.04";

/// Desired instance values
///
/// `project_id` and `image` are fixed at creation; changing either plans a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub project_id: String,
    pub name: String,
    #[serde(default = "default_cpu")]
    pub cpu: u32,
    #[serde(default = "default_memory_mb")]
    pub memory_mb: u32,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default)]
    pub status: InstanceStatus,
}

fn default_cpu() -> u32 {
    DEFAULT_CPU
}

fn default_memory_mb() -> u32 {
    DEFAULT_MEMORY_MB
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

impl InstanceSpec {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            cpu: DEFAULT_CPU,
            memory_mb: DEFAULT_MEMORY_MB,
            image: DEFAULT_IMAGE.to_string(),
            status: InstanceStatus::default(),
        }
    }

    pub fn with_cpu(mut self, cpu: u32) -> Self {
        self.cpu = cpu;
        self
    }

    pub fn with_memory_mb(mut self, memory_mb: u32) -> Self {
        self.memory_mb = memory_mb;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_status(mut self, status: InstanceStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceResource;

impl Resource for InstanceResource {
    const KIND: &'static str = "instance";

    type Entity = Instance;
    type Spec = InstanceSpec;
    type Key = String;
    type CreateRequest = CreateInstanceRequest;
    type UpdateRequest = UpdateInstanceRequest;
    type DestroyPolicy = ();

    fn validate_spec(&self, spec: &InstanceSpec) -> Result<()> {
        validation::non_empty(Self::KIND, "project_id", &spec.project_id)?;
        validation::non_empty(Self::KIND, "name", &spec.name)?;
        validation::non_empty(Self::KIND, "image", &spec.image)?;
        validation::positive(Self::KIND, "cpu", spec.cpu)?;
        validation::positive(Self::KIND, "memory_mb", spec.memory_mb)
    }

    fn validate_update(&self, update: &UpdateInstanceRequest) -> Result<()> {
        if let Some(name) = &update.name {
            validation::non_empty(Self::KIND, "name", name)?;
        }
        if let Some(cpu) = update.cpu {
            validation::positive(Self::KIND, "cpu", cpu)?;
        }
        if let Some(memory_mb) = update.memory_mb {
            validation::positive(Self::KIND, "memory_mb", memory_mb)?;
        }
        Ok(())
    }

    fn create_path(&self, _spec: &InstanceSpec) -> String {
        "/instances".to_string()
    }

    fn entity_path(&self, key: &String) -> String {
        format!("/instances/{}", key)
    }

    fn key_of(&self, entity: &Instance) -> String {
        entity.id.clone()
    }

    fn create_request(&self, spec: &InstanceSpec) -> CreateInstanceRequest {
        CreateInstanceRequest {
            project_id: spec.project_id.clone(),
            name: spec.name.clone(),
            cpu: spec.cpu,
            memory_mb: spec.memory_mb,
            image: spec.image.clone(),
            status: spec.status,
        }
    }

    fn diff(&self, observed: &Instance, desired: &InstanceSpec) -> Change<UpdateInstanceRequest> {
        let mut immutable = Vec::new();
        if observed.project_id != desired.project_id {
            immutable.push("project_id");
        }
        if observed.image != desired.image {
            immutable.push("image");
        }
        if !immutable.is_empty() {
            return Change::Replace { fields: immutable };
        }

        let update = UpdateInstanceRequest {
            name: (observed.name != desired.name).then(|| desired.name.clone()),
            cpu: (observed.cpu != desired.cpu).then_some(desired.cpu),
            memory_mb: (observed.memory_mb != desired.memory_mb).then_some(desired.memory_mb),
            status: (observed.status != desired.status).then_some(desired.status),
        };

        if update == UpdateInstanceRequest::default() {
            Change::NoOp
        } else {
            Change::Update(update)
        }
    }

    fn parse_import_id(&self, raw: &str) -> Result<String> {
        parse_plain_id(Self::KIND, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn observed() -> Instance {
        Instance {
            id: "i-1".to_string(),
            project_id: "p-1".to_string(),
            name: "web".to_string(),
            cpu: 2,
            memory_mb: 2048,
            image: "ubuntu:20.04".to_string(),
            status: InstanceStatus::Running,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_spec_defaults() {
        let spec: InstanceSpec =
            serde_json::from_value(serde_json::json!({ "project_id": "p-1", "name": "web" }))
                .unwrap();
        assert_eq!(spec, InstanceSpec::new("p-1", "web"));
        assert_eq!(spec.cpu, 2);
        assert_eq!(spec.memory_mb, 2048);
        assert_eq!(spec.image, "ubuntu:20.04");
        assert_eq!(spec.status, InstanceStatus::Running);
    }

    #[test]
    fn test_diff_only_changed_fields() {
        let desired = InstanceSpec::new("p-1", "web")
            .with_cpu(4)
            .with_status(InstanceStatus::Stopped);

        match InstanceResource.diff(&observed(), &desired) {
            Change::Update(req) => {
                assert_eq!(
                    serde_json::to_value(&req).unwrap(),
                    serde_json::json!({ "cpu": 4, "status": "stopped" })
                );
            }
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[test]
    fn test_diff_immutable_fields_replace() {
        let desired = InstanceSpec::new("p-2", "web").with_image("debian:12");
        assert_eq!(
            InstanceResource.diff(&observed(), &desired),
            Change::Replace {
                fields: vec!["project_id", "image"]
            }
        );
    }

    #[test]
    fn test_diff_no_changes() {
        assert_eq!(
            InstanceResource.diff(&observed(), &InstanceSpec::new("p-1", "web")),
            Change::NoOp
        );
    }

    #[test]
    fn test_validate_rejects_zero_cpu() {
        let spec = InstanceSpec::new("p-1", "web").with_cpu(0);
        assert!(InstanceResource.validate_spec(&spec).is_err());

        let update = UpdateInstanceRequest {
            memory_mb: Some(0),
            ..Default::default()
        };
        assert!(InstanceResource.validate_update(&update).is_err());
    }
}
