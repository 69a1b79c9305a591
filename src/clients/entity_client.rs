use async_trait::async_trait;
use tokio::sync::watch;

use crate::clients::EntityResource;
use crate::framework::{ClientError, EntityState, ListQuery, RestEntity};

/// Trait for entity-specific clients to inherit the standard operations.
///
/// Wrappers only provide [`resource`](EntityClient::resource); everything
/// else is a default method delegating to the generic [`EntityResource`].
/// This keeps the five typed clients down to their domain-specific extras.
#[async_trait]
pub trait EntityClient<T: RestEntity>: Send + Sync {
    /// Access the underlying generic resource.
    fn resource(&self) -> &EntityResource<T>;

    /// Fetch the full collection.
    async fn fetch_all(&self, query: ListQuery) -> Result<Vec<T>, ClientError> {
        self.resource().fetch_all(&query).await
    }

    /// Fetch one entity by id.
    async fn fetch_one(&self, id: T::Id) -> Result<T, ClientError> {
        self.resource().fetch_one(id).await
    }

    /// Create a new entity.
    async fn create(&self, entity: T) -> Result<T, ClientError> {
        self.resource().create(entity).await
    }

    /// Fully replace an existing entity.
    async fn update(&self, entity: T) -> Result<T, ClientError> {
        self.resource().update(entity).await
    }

    /// Change only the supplied fields of an existing entity.
    async fn partial_update(&self, entity: T) -> Result<T, ClientError> {
        self.resource().partial_update(entity).await
    }

    /// Delete an entity by id.
    async fn delete(&self, id: T::Id) -> Result<(), ClientError> {
        self.resource().delete(id).await
    }

    /// Create or update depending on id presence.
    async fn save(&self, entity: T) -> Result<T, ClientError> {
        self.resource().save(entity).await
    }

    /// Return the store to its initial state.
    async fn reset(&self) -> Result<(), ClientError> {
        self.resource().reset().await
    }

    /// Snapshot of the current store state.
    fn state(&self) -> EntityState<T> {
        self.resource().state()
    }

    /// Subscribe to store changes.
    fn watch(&self) -> watch::Receiver<EntityState<T>> {
        self.resource().watch()
    }
}
