//! [`ActorEntity`] implementation for [`OwnerProfile`].

use super::error::OwnerProfileError;
use crate::clients::UserClient;
use crate::model::{
    Actor, OwnerProfile, OwnerProfileCreate, OwnerProfileId, OwnerProfileUpdate, Role,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

#[derive(Debug, Clone)]
pub enum OwnerProfileAction {
    /// Admin-only: marks the storefront as verified.
    Verify { by: Actor },
}

#[async_trait]
impl ActorEntity for OwnerProfile {
    type Id = OwnerProfileId;
    type Create = OwnerProfileCreate;
    type Update = OwnerProfileUpdate;
    type Action = OwnerProfileAction;
    type ActionResult = OwnerProfile;
    type Context = UserClient;
    type Error = OwnerProfileError;

    fn from_create_params(
        id: OwnerProfileId,
        params: OwnerProfileCreate,
    ) -> Result<Self, Self::Error> {
        if params.company_name.trim().is_empty() {
            return Err(OwnerProfileError::ValidationError(
                "Company name must not be empty".into(),
            ));
        }
        Ok(OwnerProfile {
            id,
            user_id: params.user_id,
            company_name: params.company_name,
            description: params.description,
            is_verified: false,
            created_at: Utc::now(),
        })
    }

    async fn on_create(&mut self, users: &UserClient) -> Result<(), Self::Error> {
        users.require_role(self.user_id, Role::Owner).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: OwnerProfileUpdate,
        _users: &UserClient,
    ) -> Result<(), Self::Error> {
        if update.by != self.user_id {
            return Err(OwnerProfileError::Unauthorized(
                "Only the owner can edit their profile.".into(),
            ));
        }
        if let Some(name) = update.company_name {
            if name.trim().is_empty() {
                return Err(OwnerProfileError::ValidationError(
                    "Company name must not be empty".into(),
                ));
            }
            self.company_name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OwnerProfileAction,
        _users: &UserClient,
    ) -> Result<OwnerProfile, Self::Error> {
        match action {
            OwnerProfileAction::Verify { by } => {
                if by.role != Role::Admin {
                    return Err(OwnerProfileError::Unauthorized(
                        "Only an admin can verify owners.".into(),
                    ));
                }
                self.is_verified = true;
                info!(profile_id = %self.id, user_id = %self.user_id, "Owner verified");
                Ok(self.clone())
            }
        }
    }
}
