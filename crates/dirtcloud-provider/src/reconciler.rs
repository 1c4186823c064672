//! Generic CRUD state machine shared by every resource type

use crate::action::{Change, Reconciled};
use crate::error::{ProviderError, Result};
use crate::resource::{MissingPolicy, Resource};
use dirtcloud_client::Client;

/// Outcome of a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refreshed<E> {
    /// The backend still has the resource; this is its current state
    Current(E),
    /// The backend no longer has the resource; the caller should drop its record
    Gone,
}

impl<E> Refreshed<E> {
    pub fn into_current(self) -> Option<E> {
        match self {
            Refreshed::Current(e) => Some(e),
            Refreshed::Gone => None,
        }
    }

    pub fn is_gone(&self) -> bool {
        matches!(self, Refreshed::Gone)
    }
}

/// Reconciler for one resource type
///
/// Each call is a single request/response exchange (plus the bucket
/// precondition listing) and holds no state between calls.
#[derive(Debug, Clone)]
pub struct Reconciler<R> {
    client: Client,
    resource: R,
}

impl<R: Resource + Default> Reconciler<R> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            resource: R::default(),
        }
    }
}

impl<R: Resource> Reconciler<R> {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Validate and create; the returned entity carries the server-assigned id
    pub async fn create(&self, spec: &R::Spec) -> Result<R::Entity> {
        self.resource.validate_spec(spec)?;

        let path = self.resource.create_path(spec);
        let request = self.resource.create_request(spec);
        let entity: R::Entity = self.client.post(&path, &request).await?;

        tracing::info!("Created {} {}", R::KIND, self.resource.key_of(&entity));
        Ok(entity)
    }

    /// Fetch the current state without any not-found handling
    pub async fn read(&self, key: &R::Key) -> Result<R::Entity> {
        let entity = self.client.get(&self.resource.entity_path(key)).await?;
        Ok(entity)
    }

    /// Re-read the resource to detect drift
    pub async fn refresh(&self, key: &R::Key) -> Result<Refreshed<R::Entity>> {
        tracing::debug!("Refreshing {} {}", R::KIND, key);

        match self.read(key).await {
            Ok(entity) => Ok(Refreshed::Current(entity)),
            Err(e)
                if e.is_not_found() && self.resource.missing_on_refresh() == MissingPolicy::Drop =>
            {
                tracing::warn!(
                    "{} {} no longer exists remotely, dropping from state",
                    R::KIND,
                    key
                );
                Ok(Refreshed::Gone)
            }
            Err(e) => Err(e),
        }
    }

    /// Send a partial update. Only set fields are transmitted.
    pub async fn apply_update(
        &self,
        key: &R::Key,
        update: &R::UpdateRequest,
    ) -> Result<R::Entity> {
        self.resource.validate_update(update)?;

        let entity = self
            .client
            .patch(&self.resource.entity_path(key), update)
            .await?;

        tracing::info!("Updated {} {}", R::KIND, key);
        Ok(entity)
    }

    /// Bring `observed` in line with `desired` in place.
    ///
    /// Fails with [`ProviderError::RequiresReplacement`] without sending
    /// anything if an immutable field differs.
    pub async fn update(&self, observed: &R::Entity, desired: &R::Spec) -> Result<R::Entity> {
        self.resource.validate_spec(desired)?;

        let key = self.resource.key_of(observed);
        match self.resource.diff(observed, desired) {
            Change::Update(request) => self.apply_update(&key, &request).await,
            Change::Replace { fields } => Err(ProviderError::RequiresReplacement {
                resource: R::KIND,
                key: key.to_string(),
                fields,
            }),
            _ => Ok(observed.clone()),
        }
    }

    /// Destroy with the resource's default policy
    pub async fn destroy(&self, key: &R::Key) -> Result<()> {
        self.destroy_with(key, &R::DestroyPolicy::default()).await
    }

    /// Destroy the resource. A resource that is already gone counts as destroyed.
    pub async fn destroy_with(&self, key: &R::Key, policy: &R::DestroyPolicy) -> Result<()> {
        self.resource
            .before_destroy(&self.client, key, policy)
            .await?;

        match self.client.delete(&self.resource.entity_path(key)).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", R::KIND, key);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} {} already deleted", R::KIND, key);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reconstruct full state from an opaque external identifier
    pub async fn import(&self, raw_id: &str) -> Result<R::Entity> {
        let key = self.resource.parse_import_id(raw_id)?;
        tracing::debug!("Importing {} {}", R::KIND, key);
        self.read(&key).await
    }

    /// Decide which operation a (desired, observed) pair calls for
    pub fn plan(
        &self,
        desired: Option<&R::Spec>,
        observed: Option<&R::Entity>,
    ) -> Result<Change<R::UpdateRequest>> {
        if let Some(spec) = desired {
            self.resource.validate_spec(spec)?;
        }

        let change = match (desired, observed) {
            (Some(_), None) => Change::Create,
            (None, Some(_)) => Change::Delete,
            (None, None) => Change::NoOp,
            (Some(spec), Some(entity)) => self.resource.diff(entity, spec),
        };

        tracing::debug!("Planned {} for {}", change.action_type(), R::KIND);
        Ok(change)
    }

    /// Plan and execute in one step.
    ///
    /// `policy` is the destroy policy recorded with the prior state; it only
    /// matters when the plan deletes or replaces.
    pub async fn reconcile(
        &self,
        desired: Option<&R::Spec>,
        observed: Option<&R::Entity>,
        policy: &R::DestroyPolicy,
    ) -> Result<Reconciled<R::Entity>> {
        let change = self.plan(desired, observed)?;

        match (change, desired, observed) {
            (Change::Create, Some(spec), _) => Ok(Reconciled::Created(self.create(spec).await?)),
            (Change::Update(request), _, Some(entity)) => {
                let key = self.resource.key_of(entity);
                Ok(Reconciled::Updated(self.apply_update(&key, &request).await?))
            }
            (Change::Replace { fields }, Some(spec), Some(entity)) => {
                let key = self.resource.key_of(entity);
                tracing::info!(
                    "Replacing {} {} (immutable: {})",
                    R::KIND,
                    key,
                    fields.join(", ")
                );
                self.destroy_with(&key, policy).await?;
                Ok(Reconciled::Replaced(self.create(spec).await?))
            }
            (Change::Delete, _, Some(entity)) => {
                self.destroy_with(&self.resource.key_of(entity), policy)
                    .await?;
                Ok(Reconciled::Deleted)
            }
            _ => Ok(Reconciled::Unchanged),
        }
    }
}
