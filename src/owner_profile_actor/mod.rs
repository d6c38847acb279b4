//! # Owner Profile Actor
//!
//! The 1:1 storefront extension of an owner account. `Context = UserClient`, used to
//! check that the profile's user has the owner role.

pub mod entity;
pub mod error;

pub use entity::OwnerProfileAction;
pub use error::*;

use crate::clients::OwnerProfileClient;
use crate::model::OwnerProfile;
use actor_framework::ResourceActor;

/// Creates a new OwnerProfile actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<OwnerProfile>, OwnerProfileClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OwnerProfileClient::new(generic_client))
}
