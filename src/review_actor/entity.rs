//! [`ActorEntity`] implementation for [`Review`].

use super::error::ReviewError;
use crate::clients::{ProductClient, UserClient};
use crate::model::{Review, ReviewCreate, ReviewId, ReviewUpdate, Role};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

/// Reviews have no custom actions.
#[derive(Debug, Clone)]
pub enum ReviewAction {}

fn validate_rating(rating: u8) -> Result<(), ReviewError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::InvalidRating(rating))
    }
}

#[async_trait]
impl ActorEntity for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Action = ReviewAction;
    type ActionResult = ();
    type Context = (UserClient, ProductClient);
    type Error = ReviewError;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, Self::Error> {
        validate_rating(params.rating)?;
        Ok(Review {
            id,
            customer_id: params.customer_id,
            owner_id: params.owner_id,
            product_id: params.product_id,
            rating: params.rating,
            comment: params.comment,
            created_at: Utc::now(),
        })
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (users, products) = ctx;
        users.require_role(self.customer_id, Role::Customer).await?;
        users.require_role(self.owner_id, Role::Owner).await?;
        if let Some(product_id) = self.product_id {
            let product = products.get_product(product_id).await?;
            if product.owner_id != self.owner_id {
                return Err(ReviewError::ValidationError(format!(
                    "{product_id} is not sold by {}",
                    self.owner_id
                )));
            }
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: ReviewUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if update.by != self.customer_id {
            return Err(ReviewError::Unauthorized(
                "Only the author can edit a review.".into(),
            ));
        }
        if let Some(rating) = update.rating {
            validate_rating(rating)?;
            self.rating = rating;
        }
        if let Some(comment) = update.comment {
            self.comment = comment;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ReviewAction,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
