//! # Cart Actor
//!
//! One cart per customer, created by the first `add_item`. `Context = (UserClient,
//! ProductClient)`: the owner of a new cart must be a customer and every item must
//! reference an existing product.

pub mod entity;
pub mod error;

pub use entity::CartAction;
pub use error::*;

use crate::clients::CartClient;
use crate::model::Cart;
use actor_framework::ResourceActor;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
