use super::print_json;
use crate::kind::ResourceKind;
use colored::Colorize;
use dirtcloud_client::Client;
use dirtcloud_provider::{
    BucketResource, InstanceResource, MetadataResource, ObjectResource, ProjectResource,
    Reconciler, Refreshed, Resource,
};
use serde::Serialize;

pub async fn handle(client: Client, kind: ResourceKind, id: &str) -> anyhow::Result<()> {
    let found = match kind {
        ResourceKind::Project => refresh_as::<ProjectResource>(client, id).await?,
        ResourceKind::Instance => refresh_as::<InstanceResource>(client, id).await?,
        ResourceKind::Metadata => refresh_as::<MetadataResource>(client, id).await?,
        ResourceKind::Bucket => refresh_as::<BucketResource>(client, id).await?,
        ResourceKind::Object => refresh_as::<ObjectResource>(client, id).await?,
    };

    if !found {
        eprintln!(
            "{}",
            format!("ℹ {} '{}' はリモートに存在しません", kind, id).dimmed()
        );
    }
    Ok(())
}

/// リソースが存在すれば出力して true を返す
async fn refresh_as<R>(client: Client, id: &str) -> anyhow::Result<bool>
where
    R: Resource + Default,
    R::Entity: Serialize,
{
    let reconciler = Reconciler::<R>::new(client);
    let key = reconciler.resource().parse_import_id(id)?;

    match reconciler.refresh(&key).await? {
        Refreshed::Current(entity) => {
            print_json(&entity)?;
            Ok(true)
        }
        Refreshed::Gone => Ok(false),
    }
}
