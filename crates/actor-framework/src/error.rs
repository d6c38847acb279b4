//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus a boxed slot for the
//! entity-specific error that caused a hook to fail.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The item is staged for deletion by an in-flight transaction.
    #[error("Item is locked by a pending transaction: {0}")]
    Locked(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error carried by [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when the error is a plumbing error or the
    /// boxed error is of a different type, so callers can fall through to a
    /// generic mapping.
    ///
    /// ```rust
    /// use actor_framework::FrameworkError;
    ///
    /// #[derive(Debug, thiserror::Error, PartialEq)]
    /// #[error("out of stock")]
    /// struct OutOfStock;
    ///
    /// let err = FrameworkError::EntityError(Box::new(OutOfStock));
    /// assert_eq!(err.downcast_entity::<OutOfStock>().unwrap(), OutOfStock);
    ///
    /// let err = FrameworkError::ActorClosed;
    /// assert!(err.downcast_entity::<OutOfStock>().is_err());
    /// ```
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|typed| *typed)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}
