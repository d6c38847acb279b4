//! Error types for the Product actor.

use crate::error::{Classify, ErrorKind};
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Not enough stock available.")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (e.g., zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// The caller is not the product's owner.
    #[error("{0}")]
    Unauthorized(String),

    /// The listing owner could not be verified.
    #[error(transparent)]
    Owner(#[from] UserError),

    /// The product is staged for deletion by an account cascade.
    #[error("Product {0} is being deleted")]
    Locked(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}

impl Classify for ProductError {
    fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::InsufficientStock { .. } => ErrorKind::ResourceConstraint,
            ProductError::InvalidQuantity(_) | ProductError::ValidationError(_) => {
                ErrorKind::Validation
            }
            ProductError::Unauthorized(_) => ErrorKind::Unauthorized,
            ProductError::Owner(e) => e.kind(),
            ProductError::Locked(_) => ErrorKind::InvalidState,
            ProductError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
