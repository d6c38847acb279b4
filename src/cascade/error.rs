//! Error types for the cascade coordinator.

use crate::error::{Classify, ErrorKind};
use crate::model::UserId;
use actor_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// A self-service deletion guard failed. Nothing was deleted.
    #[error("{0}")]
    GuardViolation(String),

    /// Another deletion already holds one of the records. Nothing was deleted.
    #[error("A related record is already being deleted ({0}); no changes were committed.")]
    Busy(String),

    /// Staging failed and the transaction was aborted. Nothing was deleted.
    #[error("Account deletion failed; no changes were committed.")]
    Aborted(#[source] FrameworkError),

    /// An actor went away during the commit phase.
    #[error("Account deletion could not be completed: {0}")]
    Incomplete(#[source] FrameworkError),
}

impl Classify for CascadeError {
    fn kind(&self) -> ErrorKind {
        match self {
            CascadeError::Unauthorized(_) => ErrorKind::Unauthorized,
            CascadeError::UserNotFound(_) => ErrorKind::NotFound,
            CascadeError::GuardViolation(_) | CascadeError::Busy(_) => ErrorKind::InvalidState,
            CascadeError::Aborted(_) | CascadeError::Incomplete(_) => ErrorKind::Internal,
        }
    }
}

impl CascadeError {
    pub(crate) fn from_prepare(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Locked(id) => CascadeError::Busy(id),
            other => CascadeError::Aborted(other),
        }
    }
}
