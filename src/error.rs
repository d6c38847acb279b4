//! # Error Taxonomy
//!
//! Every actor keeps its own `thiserror` enum so callers can match on precise variants.
//! [`Classify`] folds all of them onto one small [`ErrorKind`] set, which is what the
//! external router needs to pick a response status.

use serde::Serialize;

/// Coarse error categories shared by every domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// A referenced order, product, user, cart, review or profile does not exist.
    NotFound,
    /// The caller is not allowed to perform the operation (wrong party or wrong role).
    Unauthorized,
    /// The target is not in a state that permits the operation, or is locked by a
    /// pending deletion.
    InvalidState,
    /// Not enough stock.
    ResourceConstraint,
    /// Malformed input.
    Validation,
    /// Plumbing failures: an actor went away, a cascade could not complete.
    Internal,
}

impl ErrorKind {
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Unauthorized => 403,
            ErrorKind::InvalidState => 409,
            ErrorKind::ResourceConstraint => 409,
            ErrorKind::Validation => 400,
            ErrorKind::Internal => 500,
        }
    }
}

/// Maps a domain error onto its [`ErrorKind`].
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}
