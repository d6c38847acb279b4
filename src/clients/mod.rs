//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client implements [`ActorClient`](actor_framework::ActorClient) for `get`,
//! `query` and `delete`, and adds the domain operations of its actor. Authorization
//! that depends only on the caller (role, "is this me") is checked here, before a
//! message is sent; authorization that depends on the entity is checked by the actor.

pub mod cart_client;
pub mod order_client;
pub mod owner_profile_client;
pub mod product_client;
pub mod review_client;
pub mod user_client;

pub use cart_client::*;
pub use order_client::*;
pub use owner_profile_client::*;
pub use product_client::*;
pub use review_client::*;
pub use user_client::*;
