//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the store for one
//! entity type. It processes messages sequentially, which is what makes every single
//! request (including a staged prepare or a commit) atomic with respect to every other.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::transaction::TxId;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// The actor owns three maps and nothing else touches them:
///
/// * `store` - the committed entities.
/// * `locks` - entity id to the transaction that staged it for deletion.
/// * `staged` - transaction to the ids it staged, in prepare order.
///
/// Locked entities stay visible to `Get` and `Query` until the commit, so readers never
/// observe half of a cascade. Mutating requests against a locked entity fail with
/// [`FrameworkError::Locked`].
///
/// # Usage Pattern
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Loaf { id: u32, sold: bool }
/// #[derive(Debug)] struct LoafCreate;
/// #[derive(Debug)] struct LoafUpdate;
/// #[derive(Debug)] enum LoafAction { Sell }
/// #[derive(Debug, thiserror::Error)] #[error("already sold")] struct LoafError;
///
/// #[async_trait]
/// impl ActorEntity for Loaf {
///     type Id = u32;
///     type Create = LoafCreate;
///     type Update = LoafUpdate;
///     type Action = LoafAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = LoafError;
///
///     fn from_create_params(id: u32, _: LoafCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, sold: false })
///     }
///     async fn on_update(&mut self, _: LoafUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: LoafAction, _: &()) -> Result<(), Self::Error> {
///         if self.sold { return Err(LoafError); }
///         self.sold = true;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Loaf>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(LoafCreate).await.unwrap();
///     client.perform_action(id, LoafAction::Sell).await.unwrap();
///     assert!(client.perform_action(id, LoafAction::Sell).await.is_err());
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    locks: HashMap<T::Id, TxId>,
    staged: HashMap<TxId, Vec<T::Id>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When it is full, client calls
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            locks: HashMap::new(),
            staged: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn locked(&self, id: &T::Id) -> bool {
        self.locks.contains_key(id)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "bakery_market::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, filter = filter.label(), count = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if self.locked(&id) {
                        warn!(entity_type, %id, "Update rejected, locked");
                        let _ = respond_to.send(Err(FrameworkError::Locked(id.to_string())));
                        continue;
                    }
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.locked(&id) {
                        warn!(entity_type, %id, "Delete rejected, locked");
                        let _ = respond_to.send(Err(FrameworkError::Locked(id.to_string())));
                        continue;
                    }
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if self.locked(&id) {
                        warn!(entity_type, %id, "Action rejected, locked");
                        let _ = respond_to.send(Err(FrameworkError::Locked(id.to_string())));
                        continue;
                    }
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Prepare {
                    tx,
                    filter,
                    respond_to,
                } => {
                    debug!(entity_type, %tx, filter = filter.label(), "Prepare");
                    let mut matched: Vec<(T::Id, T)> = Vec::new();
                    let mut conflict = None;
                    for (id, item) in &self.store {
                        if !filter.matches(item) {
                            continue;
                        }
                        match self.locks.get(id) {
                            // Already staged by this transaction through an overlapping plan.
                            Some(holder) if *holder == tx => {}
                            Some(_) => {
                                conflict = Some(id.clone());
                                break;
                            }
                            None => matched.push((id.clone(), item.clone())),
                        }
                    }

                    if let Some(id) = conflict {
                        warn!(entity_type, %tx, %id, "Prepare conflict");
                        let _ = respond_to.send(Err(FrameworkError::Locked(id.to_string())));
                        continue;
                    }

                    let staged = self.staged.entry(tx).or_default();
                    for (id, _) in &matched {
                        self.locks.insert(id.clone(), tx);
                        staged.push(id.clone());
                    }
                    info!(entity_type, %tx, count = matched.len(), "Prepared");
                    let snapshots = matched.into_iter().map(|(_, item)| item).collect();
                    let _ = respond_to.send(Ok(snapshots));
                }
                ResourceRequest::Commit { tx, respond_to } => {
                    let ids = self.staged.remove(&tx).unwrap_or_default();
                    let mut removed = 0;
                    for id in ids {
                        self.locks.remove(&id);
                        if self.store.remove(&id).is_some() {
                            removed += 1;
                        }
                    }
                    info!(entity_type, %tx, removed, size = self.store.len(), "Committed");
                    let _ = respond_to.send(Ok(removed));
                }
                ResourceRequest::Abort { tx, respond_to } => {
                    let released = match self.staged.remove(&tx) {
                        Some(ids) => {
                            for id in &ids {
                                self.locks.remove(id);
                            }
                            ids.len()
                        }
                        None => 0,
                    };
                    info!(entity_type, %tx, released, "Aborted");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        if !self.staged.is_empty() {
            warn!(entity_type, pending = self.staged.len(), "Shutdown with staged transactions");
        }
        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
