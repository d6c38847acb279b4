//! # Transactions
//!
//! A delete-only two-phase protocol across any number of resource actors.
//!
//! 1. **Prepare**: each actor locks the entities matching a filter and returns snapshots.
//!    A prepare is atomic inside its actor: it either locks every match or nothing.
//! 2. **Commit**: every enlisted actor removes what it staged.
//! 3. **Abort**: every enlisted actor releases its locks. Nothing was removed, so the
//!    stores are exactly as they were before the first prepare.
//!
//! Until the commit, staged entities are still readable and cannot be mutated, so no
//! reader ever sees part of a cascade and no writer can slip a change under it.
//!
//! ```rust
//! use actor_framework::{ActorEntity, Filter, ResourceActor, Transaction};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Tray { id: u32, shelf: u32 }
//! #[derive(Debug)] struct TrayCreate(u32);
//! #[derive(Debug)] struct TrayUpdate;
//! #[derive(Debug)] enum TrayAction {}
//! #[derive(Debug, thiserror::Error)] #[error("tray error")] struct TrayError;
//!
//! #[async_trait]
//! impl ActorEntity for Tray {
//!     type Id = u32; type Create = TrayCreate; type Update = TrayUpdate;
//!     type Action = TrayAction; type ActionResult = ();
//!     type Context = (); type Error = TrayError;
//!     fn from_create_params(id: u32, p: TrayCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, shelf: p.0 })
//!     }
//!     async fn on_update(&mut self, _: TrayUpdate, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, _: TrayAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, trays) = ResourceActor::<Tray>::new(10);
//!     tokio::spawn(actor.run(()));
//!     trays.create(TrayCreate(1)).await.unwrap();
//!     trays.create(TrayCreate(2)).await.unwrap();
//!
//!     let mut tx = Transaction::begin();
//!     let staged = tx
//!         .prepare_delete(&trays, Filter::new("shelf 1", |t: &Tray| t.shelf == 1))
//!         .await
//!         .unwrap();
//!     assert_eq!(staged.len(), 1);
//!     assert_eq!(tx.commit().await.unwrap(), 1);
//!
//!     assert_eq!(trays.query(Filter::all()).await.unwrap().len(), 1);
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::filter::Filter;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

static NEXT_TX: AtomicU64 = AtomicU64::new(1);

/// Process-unique transaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxId(u64);

impl TxId {
    pub fn next() -> Self {
        Self(NEXT_TX.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx_{}", self.0)
    }
}

/// An actor enlisted in a transaction, with its entity type erased.
#[async_trait]
pub trait Participant: Send + Sync {
    fn entity_type(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    async fn commit(&self, tx: TxId) -> Result<usize, FrameworkError>;
    async fn abort(&self, tx: TxId) -> Result<(), FrameworkError>;
}

#[async_trait]
impl<T: ActorEntity> Participant for ResourceClient<T> {
    fn entity_type(&self) -> &'static str {
        std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn commit(&self, tx: TxId) -> Result<usize, FrameworkError> {
        ResourceClient::<T>::commit(self, tx).await
    }

    async fn abort(&self, tx: TxId) -> Result<(), FrameworkError> {
        ResourceClient::<T>::abort(self, tx).await
    }
}

/// Client-side handle on one transaction.
///
/// Consumed by [`commit`](Transaction::commit) or [`abort`](Transaction::abort).
/// Dropping it unfinished (for example because the request future was cancelled)
/// spawns an abort on the current Tokio runtime.
pub struct Transaction {
    id: TxId,
    participants: Vec<Box<dyn Participant>>,
    finished: bool,
}

impl Transaction {
    pub fn begin() -> Self {
        let id = TxId::next();
        debug!(tx = %id, "Transaction started");
        Self {
            id,
            participants: Vec::new(),
            finished: false,
        }
    }

    pub fn id(&self) -> TxId {
        self.id
    }

    fn enlist<T: ActorEntity>(&mut self, client: &ResourceClient<T>) {
        let known = self.participants.iter().any(|p| {
            p.as_any()
                .downcast_ref::<ResourceClient<T>>()
                .is_some_and(|enlisted| enlisted.same_actor(client))
        });
        if !known {
            self.participants.push(Box::new(client.clone()));
        }
    }

    /// Stages every match of `filter` for deletion and returns the snapshots.
    ///
    /// The actor is enlisted *before* the request goes out, so an abort also reaches
    /// an actor whose reply was lost.
    pub async fn prepare_delete<T: ActorEntity>(
        &mut self,
        client: &ResourceClient<T>,
        filter: Filter<T>,
    ) -> Result<Vec<T>, FrameworkError> {
        self.enlist(client);
        client.prepare(self.id, filter).await
    }

    /// Commits every participant in enlistment order and returns the number of
    /// entities removed.
    ///
    /// The commit phase runs on its own task. Once started it finishes even if the
    /// caller stops waiting, so no participant is left holding locks.
    ///
    /// A commit only fails when an actor has gone away. The participants after it are
    /// aborted; the ones before it have already applied their deletions.
    pub async fn commit(mut self) -> Result<usize, FrameworkError> {
        self.finished = true;
        let participants = std::mem::take(&mut self.participants);
        let tx = self.id;
        tokio::spawn(commit_all(tx, participants))
            .await
            .map_err(|e| {
                error!(%tx, error = %e, "Commit task failed");
                FrameworkError::ActorDropped
            })?
    }

    /// Releases every lock taken by this transaction.
    pub async fn abort(mut self) {
        self.finished = true;
        let participants = std::mem::take(&mut self.participants);
        abort_all(self.id, participants).await;
        info!(tx = %self.id, "Transaction aborted");
    }
}

async fn commit_all(
    tx: TxId,
    participants: Vec<Box<dyn Participant>>,
) -> Result<usize, FrameworkError> {
    let mut removed = 0;
    let mut pending = participants.into_iter();
    while let Some(participant) = pending.next() {
        match participant.commit(tx).await {
            Ok(count) => removed += count,
            Err(e) => {
                error!(
                    %tx,
                    entity_type = participant.entity_type(),
                    error = %e,
                    "Commit failed"
                );
                abort_all(tx, pending.collect()).await;
                return Err(e);
            }
        }
    }
    info!(%tx, removed, "Transaction committed");
    Ok(removed)
}

async fn abort_all(tx: TxId, participants: Vec<Box<dyn Participant>>) {
    for participant in participants {
        if let Err(e) = participant.abort(tx).await {
            warn!(%tx, entity_type = participant.entity_type(), error = %e, "Abort failed");
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.finished || self.participants.is_empty() {
            return;
        }
        let participants = std::mem::take(&mut self.participants);
        let tx = self.id;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(%tx, "Transaction dropped unfinished, aborting");
                handle.spawn(abort_all(tx, participants));
            }
            Err(_) => error!(%tx, "Transaction dropped outside a runtime, locks stay held"),
        }
    }
}
