//! # Order Actor
//!
//! Owns every [`Order`] and its status machine. It is the most connected actor:
//! `Context = (UserClient, ProductClient)`, injected at `run()`.
//!
//! ## Structure
//!
//! - [`entity`] - placement (`on_create`) and transitions (`handle_action`)
//! - [`actions`] - [`OrderAction`], one variant per lifecycle operation
//! - [`error`] - [`OrderError`], wrapping User and Product failures
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::model::Order;
use crate::notify::Notifier;
use actor_framework::ResourceActor;
use std::sync::Arc;

/// Creates a new Order actor and its client.
///
/// The clients given here serve the [`OrderClient`]'s read projections; the actor
/// still needs its own `(UserClient, ProductClient)` context at `run()`.
pub fn new(
    buffer_size: usize,
    users: UserClient,
    products: ProductClient,
    notifier: Arc<dyn Notifier>,
) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = OrderClient::new(generic_client, users, products, notifier);
    (actor, client)
}
