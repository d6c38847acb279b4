//! # Review Actor
//!
//! Customer ratings of owners. Both parties are verified by role when a review is
//! posted; a review about a product must name that product's owner.

pub mod entity;
pub mod error;

pub use entity::ReviewAction;
pub use error::*;

use crate::clients::ReviewClient;
use crate::model::Review;
use actor_framework::ResourceActor;

/// Creates a new Review actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Review>, ReviewClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ReviewClient::new(generic_client))
}
