//! # Review Client
use crate::model::{Actor, Review, ReviewCreate, ReviewId, ReviewUpdate, Role, UserId};
use crate::review_actor::ReviewError;
use actor_framework::{ActorClient, Filter, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Review actor.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
}

impl_actor_client!(ReviewClient, Review, ReviewError);

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>) -> Self {
        Self { inner }
    }

    /// Posts a review written by `actor`, who must be the named customer.
    #[instrument(skip(self))]
    pub async fn post_review(
        &self,
        actor: Actor,
        params: ReviewCreate,
    ) -> Result<ReviewId, ReviewError> {
        debug!("Sending request");
        if actor.role != Role::Customer || actor.id != params.customer_id {
            return Err(ReviewError::Unauthorized(
                "Only the reviewing customer can post a review.".into(),
            ));
        }
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn edit_review(
        &self,
        actor: Actor,
        id: ReviewId,
        rating: Option<u8>,
        comment: Option<String>,
    ) -> Result<Review, ReviewError> {
        debug!("Sending request");
        self.inner
            .update(
                id,
                ReviewUpdate {
                    by: actor.id,
                    rating,
                    comment,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    /// Removes a review. Allowed for its author and for admins.
    #[instrument(skip(self))]
    pub async fn remove_review(&self, actor: Actor, id: ReviewId) -> Result<(), ReviewError> {
        let review = self
            .get(id)
            .await?
            .ok_or_else(|| ReviewError::NotFound(id.to_string()))?;
        if actor.role != Role::Admin && actor.id != review.customer_id {
            return Err(ReviewError::Unauthorized(
                "Only the author or an admin can remove a review.".into(),
            ));
        }
        self.delete(id).await
    }

    /// Reviews about an owner, newest first.
    #[instrument(skip(self))]
    pub async fn reviews_for_owner(&self, owner_id: UserId) -> Result<Vec<Review>, ReviewError> {
        let mut reviews = self
            .query(Filter::new("owner", move |r: &Review| r.owner_id == owner_id))
            .await?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }
}
