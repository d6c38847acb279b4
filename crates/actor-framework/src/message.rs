//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::filter::Filter;
use crate::transaction::TxId;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The first six variants are the resource lifecycle (CRUD, a filtered read,
/// and a custom [`ActorEntity::Action`]). The last three implement the
/// delete-only two-phase protocol driven by [`Transaction`](crate::Transaction):
///
/// - **Prepare**: lock every match of a filter for one transaction and return snapshots.
/// - **Commit**: remove everything the transaction staged.
/// - **Abort**: release the transaction's locks without touching data.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Prepare {
        tx: TxId,
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Commit {
        tx: TxId,
        respond_to: Response<usize>,
    },
    Abort {
        tx: TxId,
        respond_to: Response<()>,
    },
}
