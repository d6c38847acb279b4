//! Error types for the Order actor.

use crate::error::{Classify, ErrorKind};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Failures reported by the User and Product actors are carried through unchanged, so
/// a rejected placement still reads "Not enough stock available.".
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The caller is not the party the operation belongs to.
    #[error("{0}")]
    Unauthorized(String),

    /// The order's status does not allow the operation.
    #[error("{0}")]
    InvalidState(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),

    /// The order is staged for deletion by an account cascade.
    #[error("Order {0} is being deleted")]
    Locked(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl Classify for OrderError {
    fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::Unauthorized(_) => ErrorKind::Unauthorized,
            OrderError::InvalidState(_) | OrderError::Locked(_) => ErrorKind::InvalidState,
            OrderError::ValidationError(_) => ErrorKind::Validation,
            OrderError::User(e) => e.kind(),
            OrderError::Product(e) => e.kind(),
            OrderError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
