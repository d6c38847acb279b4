//! Pure data structures (DTOs). Each entity implements
//! [`ActorEntity`](actor_framework::ActorEntity) in its actor module.

pub mod cart;
pub mod order;
pub mod owner_profile;
pub mod product;
pub mod review;
pub mod user;

pub use cart::*;
pub use order::*;
pub use owner_profile::*;
pub use product::*;
pub use review::*;
pub use user::*;
