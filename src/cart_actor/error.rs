//! Error types for the Cart actor.

use crate::error::{Classify, ErrorKind};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Cart validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error("Cart {0} is being deleted")]
    Locked(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}

impl Classify for CartError {
    fn kind(&self) -> ErrorKind {
        match self {
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::ValidationError(_) => ErrorKind::Validation,
            CartError::Unauthorized(_) => ErrorKind::Unauthorized,
            CartError::User(e) => e.kind(),
            CartError::Product(e) => e.kind(),
            CartError::Locked(_) => ErrorKind::InvalidState,
            CartError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
