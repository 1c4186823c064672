use super::print_json;
use crate::kind::ResourceKind;
use colored::Colorize;
use dirtcloud_client::Client;
use dirtcloud_provider::{
    BucketResource, InstanceResource, MetadataResource, ObjectResource, ProjectResource,
    Reconciler, Resource,
};
use serde::Serialize;

pub async fn handle(client: Client, kind: ResourceKind, id: &str) -> anyhow::Result<()> {
    eprintln!("{}", format!("{} '{}' をインポート中...", kind, id).yellow());

    match kind {
        ResourceKind::Project => import_as::<ProjectResource>(client, id).await?,
        ResourceKind::Instance => import_as::<InstanceResource>(client, id).await?,
        ResourceKind::Metadata => import_as::<MetadataResource>(client, id).await?,
        ResourceKind::Bucket => import_as::<BucketResource>(client, id).await?,
        ResourceKind::Object => import_as::<ObjectResource>(client, id).await?,
    }

    eprintln!("{}", format!("✓ {} '{}' をインポートしました", kind, id).green().bold());
    Ok(())
}

async fn import_as<R>(client: Client, id: &str) -> anyhow::Result<()>
where
    R: Resource + Default,
    R::Entity: Serialize,
{
    let entity = Reconciler::<R>::new(client).import(id).await?;
    print_json(&entity)
}
