//! # Core Entity Framework
//!
//! This module defines the generic building blocks shared by every entity type.
//!
//! ## Key Types
//!
//! - [`RestEntity`]: The trait that all entity types must implement.
//! - [`EntityState`]: The cached collection + current entity + request flags.
//! - [`reduce`]: The pure request-lifecycle transition function.
//! - [`EntityStore`]: The task that owns one entity type's state.

use std::fmt::{Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::framework::error::ClientError;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any entity type must implement to be managed by the framework.
///
/// # Architecture Note
/// Every entity in this domain follows the same contract: a record with a
/// server-assigned identifier, fetched and mutated through a REST collection
/// resource. By formalizing that contract here, the store, reducer, and
/// gateway are written *once* and reused for Stock, Analysis, Indicator,
/// Portfolio, and Position alike.
///
/// The `Default` bound doubles as the "empty entity" used when no record is
/// selected and after a delete of the current record.
pub trait RestEntity:
    Clone + Default + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The unique identifier for this entity. Assigned by the server; absent
    /// on records that have not been created yet.
    type Id: Clone + PartialEq + Display + Debug + Serialize + Send + Sync + 'static;

    /// The lowercase-plural collection path segment (e.g. `"stocks"`).
    const RESOURCE: &'static str;

    /// The identifier, if the server has assigned one.
    fn id(&self) -> Option<Self::Id>;

    /// Names of fields that reference related entities.
    ///
    /// Request bodies never carry deeply nested objects: before transmission
    /// these fields are flattened to `{ "id": ... }` stubs, or removed when
    /// null or id-less (child collections fall in the latter bucket).
    fn relation_fields() -> &'static [&'static str] {
        &[]
    }

    /// Client-side required-field checks, run before submission.
    ///
    /// A failing check blocks the request entirely; it never reaches the
    /// gateway and never touches the store.
    fn validate(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

// =============================================================================
// 2. LIFECYCLE EVENTS
// =============================================================================

/// The six logical operations a resource supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchList,
    FetchOne,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

impl Operation {
    /// Reads drive the `loading` flag.
    pub fn is_read(self) -> bool {
        matches!(self, Operation::FetchList | Operation::FetchOne)
    }

    /// Writes drive the `updating` flag.
    pub fn is_write(self) -> bool {
        !self.is_read()
    }
}

/// A tagged notification that a request started, succeeded, or failed.
///
/// All network effects live in the gateway; the store only ever sees these
/// events, applied in the order they arrive.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent<T: RestEntity> {
    /// A request was dispatched.
    Pending(Operation),
    /// A list fetch resolved; the payload replaces the cached collection.
    ListFulfilled(Vec<T>),
    /// A single-entity operation resolved (fetch, create, update, or
    /// partial update); the payload becomes the current entity.
    EntityFulfilled(Operation, T),
    /// A delete resolved for the given id.
    DeleteFulfilled(T::Id),
    /// A request failed with a human-readable message.
    Rejected(Operation, String),
    /// Return to the initial all-clear state (e.g. when switching from
    /// "edit existing" to "create new").
    Reset,
}

// =============================================================================
// 3. STATE & REDUCER
// =============================================================================

/// Per-entity-type client state: the last-fetched collection, the current
/// entity under detail/edit view, and the request-lifecycle flags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityState<T: RestEntity> {
    /// Cached snapshot of the server's collection, in server order.
    /// Fully replaced on every successful list fetch, never merged.
    pub entities: Vec<T>,
    /// The current entity, or the empty default when none is selected.
    pub entity: T,
    /// True while a read (list or get) is outstanding.
    pub loading: bool,
    /// True while a write (create/update/partial update/delete) is outstanding.
    pub updating: bool,
    /// True exactly once a write has completed successfully; cleared again at
    /// the start of every new request. Consumed by callers to trigger
    /// navigation.
    pub update_success: bool,
    /// Last error description, if any.
    pub error_message: Option<String>,
}

/// The pure state-transition function driving [`EntityState`].
///
/// Deterministic and side-effect-free: given the same state and event it
/// always produces the same next state. Overlapping requests are not
/// reordered; whichever completion event arrives last wins.
pub fn reduce<T: RestEntity>(state: &EntityState<T>, event: LifecycleEvent<T>) -> EntityState<T> {
    let mut next = state.clone();
    match event {
        LifecycleEvent::Pending(op) => {
            next.error_message = None;
            next.update_success = false;
            if op.is_read() {
                next.loading = true;
            } else {
                next.updating = true;
            }
        }
        LifecycleEvent::ListFulfilled(entities) => {
            next.entities = entities;
            next.loading = false;
        }
        LifecycleEvent::EntityFulfilled(Operation::FetchOne, entity) => {
            next.entity = entity;
            next.loading = false;
        }
        LifecycleEvent::EntityFulfilled(_, entity) => {
            next.entity = entity;
            next.loading = false;
            next.updating = false;
            next.update_success = true;
        }
        LifecycleEvent::DeleteFulfilled(id) => {
            next.updating = false;
            next.update_success = true;
            if next.entity.id() == Some(id) {
                next.entity = T::default();
            }
        }
        LifecycleEvent::Rejected(op, message) => {
            next.error_message = Some(message);
            if op.is_read() {
                next.loading = false;
            } else {
                next.updating = false;
            }
        }
        LifecycleEvent::Reset => {
            next = EntityState::default();
        }
    }
    next
}

// =============================================================================
// 4. THE STORE TASK
// =============================================================================

/// The task that owns one entity type's [`EntityState`].
///
/// # Concurrency Model
/// Each store runs in its own Tokio task and applies lifecycle events
/// *sequentially*, in completion order as delivered by its channel. The state
/// is never shared mutably, so no `Mutex` or `RwLock` is needed. Observers
/// receive snapshots over a watch channel.
pub struct EntityStore<T: RestEntity> {
    receiver: mpsc::Receiver<LifecycleEvent<T>>,
    state: EntityState<T>,
    publisher: watch::Sender<EntityState<T>>,
}

impl<T: RestEntity> EntityStore<T> {
    /// Creates a store and the handle used to dispatch events into it.
    pub fn new(buffer_size: usize) -> (Self, StoreHandle<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, observer) = watch::channel(EntityState::default());
        let store = Self {
            receiver,
            state: EntityState::default(),
            publisher,
        };
        let handle = StoreHandle { sender, observer };
        (store, handle)
    }

    /// Runs the store's event loop until every handle has been dropped.
    pub async fn run(mut self) {
        // Just the type name (e.g. "Stock"), not the full module path.
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(event) = self.receiver.recv().await {
            debug!(entity_type, ?event, "Applying event");
            self.state = reduce(&self.state, event);
            self.publisher.send_replace(self.state.clone());
        }

        info!(entity_type, entities = self.state.entities.len(), "Store shutdown");
    }
}

/// Handle for dispatching lifecycle events to an [`EntityStore`] and
/// observing its state.
#[derive(Clone)]
pub struct StoreHandle<T: RestEntity> {
    sender: mpsc::Sender<LifecycleEvent<T>>,
    observer: watch::Receiver<EntityState<T>>,
}

impl<T: RestEntity> StoreHandle<T> {
    /// Queues an event for the store. Events are applied strictly in the
    /// order they are dispatched.
    pub async fn dispatch(&self, event: LifecycleEvent<T>) -> Result<(), ClientError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| ClientError::StoreClosed)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> EntityState<T> {
        self.observer.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn watch(&self) -> watch::Receiver<EntityState<T>> {
        self.observer.clone()
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================
