//! Error types for the Review actor.

use crate::error::{Classify, ErrorKind};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Review validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error("Review {0} is being deleted")]
    Locked(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ReviewError {
    fn from(msg: String) -> Self {
        ReviewError::ActorCommunicationError(msg)
    }
}

impl Classify for ReviewError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::NotFound(_) => ErrorKind::NotFound,
            ReviewError::InvalidRating(_) | ReviewError::ValidationError(_) => {
                ErrorKind::Validation
            }
            ReviewError::Unauthorized(_) => ErrorKind::Unauthorized,
            ReviewError::User(e) => e.kind(),
            ReviewError::Product(e) => e.kind(),
            ReviewError::Locked(_) => ErrorKind::InvalidState,
            ReviewError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
