//! Generic dispatcher coupling an [`EntityGateway`] with an entity store.
//!
//! Every operation follows the same shape: mark the request pending, perform
//! the gateway call, then apply the fulfilled or rejected event. Writes
//! additionally refresh the cached collection so it reflects the mutation.

use tokio::sync::watch;
use tracing::warn;

use crate::framework::{
    ClientError, EntityGateway, EntityState, LifecycleEvent, ListQuery, Operation, RestEntity,
    StoreHandle,
};

/// One entity type's full client: gateway + store, wired together.
///
/// Cloneable and cheap to pass around; clones share the same store.
#[derive(Clone)]
pub struct EntityResource<T: RestEntity> {
    gateway: EntityGateway<T>,
    store: StoreHandle<T>,
}

impl<T: RestEntity> EntityResource<T> {
    pub fn new(gateway: EntityGateway<T>, store: StoreHandle<T>) -> Self {
        Self { gateway, store }
    }

    /// Fetches the collection and replaces the cached snapshot wholesale.
    pub async fn fetch_all(&self, query: &ListQuery) -> Result<Vec<T>, ClientError> {
        self.store
            .dispatch(LifecycleEvent::Pending(Operation::FetchList))
            .await?;
        match self.gateway.list(query).await {
            Ok(entities) => {
                self.store
                    .dispatch(LifecycleEvent::ListFulfilled(entities.clone()))
                    .await?;
                Ok(entities)
            }
            Err(err) => self.reject(Operation::FetchList, err).await,
        }
    }

    /// Fetches one entity and makes it the current entity.
    pub async fn fetch_one(&self, id: T::Id) -> Result<T, ClientError> {
        self.store
            .dispatch(LifecycleEvent::Pending(Operation::FetchOne))
            .await?;
        match self.gateway.get(&id).await {
            Ok(entity) => {
                self.store
                    .dispatch(LifecycleEvent::EntityFulfilled(
                        Operation::FetchOne,
                        entity.clone(),
                    ))
                    .await?;
                Ok(entity)
            }
            Err(err) => self.reject(Operation::FetchOne, err).await,
        }
    }

    /// Submits a new entity. The server-assigned record becomes the current
    /// entity and the collection is refreshed.
    pub async fn create(&self, entity: T) -> Result<T, ClientError> {
        entity.validate()?;
        self.store
            .dispatch(LifecycleEvent::Pending(Operation::Create))
            .await?;
        match self.gateway.create(&entity).await {
            Ok(saved) => {
                self.finish_write(LifecycleEvent::EntityFulfilled(
                    Operation::Create,
                    saved.clone(),
                ))
                .await?;
                Ok(saved)
            }
            Err(err) => self.reject(Operation::Create, err).await,
        }
    }

    /// Full replace of an existing entity.
    pub async fn update(&self, entity: T) -> Result<T, ClientError> {
        entity.validate()?;
        if entity.id().is_none() {
            return Err(ClientError::Validation { field: "id" });
        }
        self.store
            .dispatch(LifecycleEvent::Pending(Operation::Update))
            .await?;
        match self.gateway.update(&entity).await {
            Ok(saved) => {
                self.finish_write(LifecycleEvent::EntityFulfilled(
                    Operation::Update,
                    saved.clone(),
                ))
                .await?;
                Ok(saved)
            }
            Err(err) => self.reject(Operation::Update, err).await,
        }
    }

    /// Partial replace: only the supplied fields change on the server.
    pub async fn partial_update(&self, entity: T) -> Result<T, ClientError> {
        if entity.id().is_none() {
            return Err(ClientError::Validation { field: "id" });
        }
        self.store
            .dispatch(LifecycleEvent::Pending(Operation::PartialUpdate))
            .await?;
        match self.gateway.partial_update(&entity).await {
            Ok(saved) => {
                self.finish_write(LifecycleEvent::EntityFulfilled(
                    Operation::PartialUpdate,
                    saved.clone(),
                ))
                .await?;
                Ok(saved)
            }
            Err(err) => self.reject(Operation::PartialUpdate, err).await,
        }
    }

    /// Removes an entity. If it was the current entity, the current entity
    /// reverts to the empty default.
    pub async fn delete(&self, id: T::Id) -> Result<(), ClientError> {
        self.store
            .dispatch(LifecycleEvent::Pending(Operation::Delete))
            .await?;
        match self.gateway.delete(&id).await {
            Ok(()) => {
                self.finish_write(LifecycleEvent::DeleteFulfilled(id)).await?;
                Ok(())
            }
            Err(err) => self.reject(Operation::Delete, err).await,
        }
    }

    /// Creates or updates depending on whether the entity already has an id,
    /// the way an edit form submits.
    pub async fn save(&self, entity: T) -> Result<T, ClientError> {
        if entity.id().is_some() {
            self.update(entity).await
        } else {
            self.create(entity).await
        }
    }

    /// Returns the store to its initial all-clear state.
    pub async fn reset(&self) -> Result<(), ClientError> {
        self.store.dispatch(LifecycleEvent::Reset).await
    }

    /// Snapshot of the current store state.
    pub fn state(&self) -> EntityState<T> {
        self.store.state()
    }

    /// Subscribe to store changes.
    pub fn watch(&self) -> watch::Receiver<EntityState<T>> {
        self.store.watch()
    }

    async fn reject<R>(&self, op: Operation, err: ClientError) -> Result<R, ClientError> {
        self.store
            .dispatch(LifecycleEvent::Rejected(op, err.to_string()))
            .await?;
        Err(err)
    }

    /// Applies a write's completion and refreshes the cached collection.
    ///
    /// The refresh is marked pending *before* the write's completion event is
    /// applied, so `update_success` is still set once the refreshed list
    /// lands — the same observable sequence as kicking off the refresh from
    /// inside the write's async action. A failed refresh is recorded in the
    /// store but does not fail the write.
    async fn finish_write(&self, completion: LifecycleEvent<T>) -> Result<(), ClientError> {
        self.store
            .dispatch(LifecycleEvent::Pending(Operation::FetchList))
            .await?;
        self.store.dispatch(completion).await?;
        match self.gateway.list(&ListQuery::default()).await {
            Ok(entities) => {
                self.store
                    .dispatch(LifecycleEvent::ListFulfilled(entities))
                    .await
            }
            Err(err) => {
                warn!(error = %err, "List refresh after write failed");
                self.store
                    .dispatch(LifecycleEvent::Rejected(Operation::FetchList, err.to_string()))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stock;
    use crate::framework::mock::MockTransport;
    use crate::framework::{EntityStore, Transport};
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn resource(transport: &Arc<MockTransport>) -> (EntityResource<Stock>, tokio::task::JoinHandle<()>) {
        let (store, handle) = EntityStore::new(16);
        let task = tokio::spawn(store.run());
        let gateway = EntityGateway::new(transport.clone() as Arc<dyn Transport>, "http://test/api");
        (EntityResource::new(gateway, handle), task)
    }

    #[tokio::test]
    async fn create_sets_update_success_and_refreshes_the_list() {
        let transport = MockTransport::new();
        transport.enqueue_ok(json!({ "id": 1, "name": "Acme", "sector": "Industrials" }));
        transport.enqueue_ok(json!([{ "id": 1, "name": "Acme", "sector": "Industrials" }]));

        let (resource, _task) = resource(&transport);
        let saved = resource.create(Stock::new("Acme", "Industrials")).await.unwrap();
        assert_eq!(saved.id, Some(1));

        let mut observer = resource.watch();
        let state = observer
            .wait_for(|s| s.update_success && !s.entities.is_empty())
            .await
            .unwrap()
            .clone();
        assert_eq!(state.entity, saved);
        assert_eq!(state.entities, vec![saved.clone()]);
        assert!(!state.updating);

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url, "http://test/api/stocks");
        assert_eq!(requests[1].method, Method::GET);
        assert!(requests[1].url.starts_with("http://test/api/stocks?cacheBuster="));
        transport.verify();
    }

    #[tokio::test]
    async fn fetch_of_a_missing_id_records_the_error_and_keeps_the_entity() {
        let transport = MockTransport::new();
        transport.enqueue_ok(json!({ "id": 5, "name": "Acme", "sector": "Industrials" }));
        transport.enqueue_err(ClientError::NotFound("404 Not Found".into()));

        let (resource, _task) = resource(&transport);
        let current = resource.fetch_one(5).await.unwrap();

        let err = resource.fetch_one(99).await.unwrap_err();
        assert_eq!(err, ClientError::NotFound("404 Not Found".into()));

        let mut observer = resource.watch();
        let state = observer
            .wait_for(|s| s.error_message.is_some())
            .await
            .unwrap()
            .clone();
        assert!(!state.loading);
        assert_eq!(state.entity, current);
        assert_eq!(state.error_message.as_deref(), Some("Not found: 404 Not Found"));
    }

    #[tokio::test]
    async fn validation_failures_never_reach_the_gateway_or_the_store() {
        let transport = MockTransport::new();
        let (resource, _task) = resource(&transport);

        let err = resource.create(Stock::default()).await.unwrap_err();
        assert_eq!(err, ClientError::Validation { field: "name" });
        assert!(transport.requests().is_empty());
        assert_eq!(resource.state(), EntityState::default());
    }

    #[tokio::test]
    async fn save_routes_by_id_presence() {
        let transport = MockTransport::new();
        // save without id: POST + refresh.
        transport.enqueue_ok(json!({ "id": 1, "name": "Acme", "sector": "Industrials" }));
        transport.enqueue_ok(json!([]));
        // save with id: PUT + refresh.
        transport.enqueue_ok(json!({ "id": 1, "name": "Acme", "sector": "Energy" }));
        transport.enqueue_ok(json!([]));

        let (resource, _task) = resource(&transport);
        let created = resource.save(Stock::new("Acme", "Industrials")).await.unwrap();
        resource
            .save(Stock {
                sector: Some("Energy".into()),
                ..created
            })
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[2].method, Method::PUT);
        assert_eq!(requests[2].url, "http://test/api/stocks/1");
        transport.verify();
    }

    #[tokio::test]
    async fn failed_refresh_is_recorded_but_does_not_fail_the_write() {
        let transport = MockTransport::new();
        transport.enqueue_ok(json!({ "id": 1, "name": "Acme", "sector": "Industrials" }));
        transport.enqueue_err(ClientError::Network("connection reset".into()));

        let (resource, _task) = resource(&transport);
        let saved = resource.create(Stock::new("Acme", "Industrials")).await;
        assert!(saved.is_ok());

        let mut observer = resource.watch();
        let state = observer
            .wait_for(|s| s.error_message.is_some())
            .await
            .unwrap()
            .clone();
        assert_eq!(
            state.error_message.as_deref(),
            Some("Network error: connection reset")
        );
    }
}
