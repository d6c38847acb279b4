//! Error types for the User actor.

use crate::error::{Classify, ErrorKind};
use crate::model::{Role, UserId};
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A user with the same email already exists.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// The user exists but does not hold the role an operation requires.
    #[error("User {id} is not a {expected} (role: {actual})")]
    WrongRole {
        id: UserId,
        expected: Role,
        actual: Role,
    },

    /// The caller may not perform this operation.
    #[error("{0}")]
    Unauthorized(String),

    /// The user is staged for deletion by an account cascade.
    #[error("User {0} is being deleted")]
    Locked(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::ActorCommunicationError(msg)
    }
}

impl Classify for UserError {
    fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::AlreadyExists(_) | UserError::Locked(_) => ErrorKind::InvalidState,
            UserError::ValidationError(_) => ErrorKind::Validation,
            UserError::WrongRole { .. } | UserError::Unauthorized(_) => ErrorKind::Unauthorized,
            UserError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
