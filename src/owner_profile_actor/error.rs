//! Error types for the OwnerProfile actor.

use crate::error::{Classify, ErrorKind};
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OwnerProfileError {
    #[error("Owner profile not found: {0}")]
    NotFound(String),

    #[error("Owner profile already exists for {0}")]
    AlreadyExists(String),

    #[error("Owner profile validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Owner profile {0} is being deleted")]
    Locked(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OwnerProfileError {
    fn from(msg: String) -> Self {
        OwnerProfileError::ActorCommunicationError(msg)
    }
}

impl Classify for OwnerProfileError {
    fn kind(&self) -> ErrorKind {
        match self {
            OwnerProfileError::NotFound(_) => ErrorKind::NotFound,
            OwnerProfileError::AlreadyExists(_) | OwnerProfileError::Locked(_) => {
                ErrorKind::InvalidState
            }
            OwnerProfileError::ValidationError(_) => ErrorKind::Validation,
            OwnerProfileError::Unauthorized(_) => ErrorKind::Unauthorized,
            OwnerProfileError::User(e) => e.kind(),
            OwnerProfileError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
