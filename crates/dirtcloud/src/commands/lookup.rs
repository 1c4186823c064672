use super::print_json;
use dirtcloud_client::{Client, InstanceFilter, InstanceStatus};
use dirtcloud_provider::DataSources;

pub async fn metadata(client: Client, path: &str) -> anyhow::Result<()> {
    let entry = DataSources::new(client).metadata(path).await?;
    print_json(&entry)
}

pub async fn projects(client: Client, name: Option<&str>) -> anyhow::Result<()> {
    let projects = DataSources::new(client).projects_named(name).await?;
    print_json(&projects)
}

pub async fn instances(
    client: Client,
    project_id: Option<String>,
    name: Option<String>,
    status: Option<InstanceStatus>,
) -> anyhow::Result<()> {
    let filter = InstanceFilter {
        project_id,
        name,
        status,
    };
    let instances = DataSources::new(client).instances(&filter).await?;
    print_json(&instances)
}
