use crate::action::Change;
use crate::error::Result;
use crate::resource::{Resource, parse_plain_id};
use crate::validation;
use dirtcloud_client::{CreateProjectRequest, Project, UpdateProjectRequest};
use serde::{Deserialize, Serialize};

/// Desired project values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
}

impl ProjectSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectResource;

impl Resource for ProjectResource {
    const KIND: &'static str = "project";

    type Entity = Project;
    type Spec = ProjectSpec;
    type Key = String;
    type CreateRequest = CreateProjectRequest;
    type UpdateRequest = UpdateProjectRequest;
    type DestroyPolicy = ();

    fn validate_spec(&self, spec: &ProjectSpec) -> Result<()> {
        validation::name(Self::KIND, &spec.name)
    }

    fn validate_update(&self, update: &UpdateProjectRequest) -> Result<()> {
        match &update.name {
            Some(name) => validation::name(Self::KIND, name),
            None => Ok(()),
        }
    }

    fn create_path(&self, _spec: &ProjectSpec) -> String {
        "/projects".to_string()
    }

    fn entity_path(&self, key: &String) -> String {
        format!("/projects/{}", key)
    }

    fn key_of(&self, entity: &Project) -> String {
        entity.id.clone()
    }

    fn create_request(&self, spec: &ProjectSpec) -> CreateProjectRequest {
        CreateProjectRequest {
            name: spec.name.clone(),
        }
    }

    fn diff(&self, observed: &Project, desired: &ProjectSpec) -> Change<UpdateProjectRequest> {
        if observed.name == desired.name {
            return Change::NoOp;
        }
        Change::Update(UpdateProjectRequest {
            name: Some(desired.name.clone()),
        })
    }

    fn parse_import_id(&self, raw: &str) -> Result<String> {
        parse_plain_id(Self::KIND, raw)
    }
}
