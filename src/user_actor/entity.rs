//! [`ActorEntity`] implementation for [`User`].

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn validate_name(name: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::ValidationError("Name must not be empty".into()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::ValidationError(format!("Invalid email: {email}"))),
    }
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_email(&params.email)?;
        Ok(User::new(id, params))
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &(),
    ) -> Result<UserActionResult, Self::Error> {
        match action {
            UserAction::RequireRole(expected) => {
                if self.role != expected {
                    return Err(UserError::WrongRole {
                        id: self.id,
                        expected,
                        actual: self.role,
                    });
                }
                Ok(UserActionResult::RequireRole(self.clone()))
            }
            UserAction::ToggleWishlist(product_id) => {
                if let Some(pos) = self.wishlist.iter().position(|p| *p == product_id) {
                    self.wishlist.remove(pos);
                    Ok(UserActionResult::ToggleWishlist(false))
                } else {
                    self.wishlist.push(product_id);
                    Ok(UserActionResult::ToggleWishlist(true))
                }
            }
        }
    }
}
