use crate::kind::ResourceKind;
use colored::Colorize;
use dirtcloud_client::Client;
use dirtcloud_provider::{
    BucketDestroyPolicy, BucketReconciler, InstanceResource, MetadataResource, ObjectResource,
    ProjectResource, Reconciler, Resource,
};

pub async fn handle(
    client: Client,
    kind: ResourceKind,
    id: &str,
    keep_nonempty: bool,
) -> anyhow::Result<()> {
    eprintln!("{}", format!("{} '{}' を削除中...", kind, id).yellow());

    if keep_nonempty && kind != ResourceKind::Bucket {
        eprintln!(
            "{}",
            "ℹ --keep-nonempty はバケットにのみ有効です".dimmed()
        );
    }

    match kind {
        ResourceKind::Project => destroy_as::<ProjectResource>(client, id).await?,
        ResourceKind::Instance => destroy_as::<InstanceResource>(client, id).await?,
        ResourceKind::Metadata => destroy_as::<MetadataResource>(client, id).await?,
        ResourceKind::Object => destroy_as::<ObjectResource>(client, id).await?,
        ResourceKind::Bucket => {
            let buckets = BucketReconciler::new(client);
            let key = buckets.resource().parse_import_id(id)?;
            let policy = BucketDestroyPolicy {
                force_destroy: !keep_nonempty,
            };
            buckets.destroy_with(&key, &policy).await?;
        }
    }

    eprintln!("{}", format!("✓ {} '{}' を削除しました", kind, id).green().bold());
    Ok(())
}

async fn destroy_as<R: Resource + Default>(client: Client, id: &str) -> anyhow::Result<()> {
    let reconciler = Reconciler::<R>::new(client);
    let key = reconciler.resource().parse_import_id(id)?;
    reconciler.destroy(&key).await?;
    Ok(())
}
