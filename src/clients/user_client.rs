//! # User Client
//!
//! Provides a high-level API for interacting with the `User` actor.
use crate::model::{Actor, ProductId, Role, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use actor_framework::{ActorClient, Filter, ResourceClient};
use tracing::{debug, instrument, warn};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_actor_client!(UserClient, User, UserError);

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    /// Registers a user. Emails are compared case-insensitively.
    ///
    /// The duplicate check is a query followed by a create, two messages, so two
    /// concurrent registrations with one email can both pass it.
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        let email = params.email.to_lowercase();
        let taken = self
            .query(Filter::new("email", move |u: &User| u.email.to_lowercase() == email))
            .await?;
        if !taken.is_empty() {
            warn!(email = %params.email, "Email already registered");
            return Err(UserError::AlreadyExists(params.email));
        }
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Like `get`, but a missing user is an error.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// Returns the user if it exists, holds `role`, and is not being deleted.
    #[instrument(skip(self))]
    pub async fn require_role(&self, id: UserId, role: Role) -> Result<User, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, UserAction::RequireRole(role))
            .await
            .map_err(Self::map_error)?
        {
            UserActionResult::RequireRole(user) => Ok(user),
            other => Err(UserError::ActorCommunicationError(format!(
                "unexpected result {other:?}"
            ))),
        }
    }

    /// Adds or removes a product on the caller's wishlist. Returns `true` when added.
    #[instrument(skip(self))]
    pub async fn toggle_wishlist(
        &self,
        actor: Actor,
        product_id: ProductId,
    ) -> Result<bool, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(actor.id, UserAction::ToggleWishlist(product_id))
            .await
            .map_err(Self::map_error)?
        {
            UserActionResult::ToggleWishlist(added) => Ok(added),
            other => Err(UserError::ActorCommunicationError(format!(
                "unexpected result {other:?}"
            ))),
        }
    }
}
