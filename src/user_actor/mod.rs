//! # User Actor
//!
//! Registered users and their roles. The User actor has no dependencies
//! (`Context = ()`), but every other actor depends on it: identities handed to them
//! are checked with [`UserAction::RequireRole`].
//!
//! ## Usage
//!
//! ```rust
//! use bakery_market::model::{Role, UserCreate};
//! use bakery_market::user_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_user(UserCreate {
//!             name: "Alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             phone: None,
//!             role: Role::Customer,
//!         })
//!         .await?;
//!     client.require_role(id, Role::Customer).await?;
//!     assert!(client.require_role(id, Role::Owner).await.is_err());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
