//! # Bakery Market
//!
//! > **A home-bakery marketplace built from resource-oriented actors.**
//!
//! Owners list baked goods, customers order them, and both sides walk each order
//! through a small status machine. Stock is reserved when an order is placed and
//! restored whenever the order is cancelled. Deleting an account removes everything
//! that hangs off it, all at once or not at all.
//!
//! ## 🏗️ Architecture
//!
//! Every resource type lives in its own [`ResourceActor`](actor_framework::ResourceActor)
//! from the `actor-framework` crate. The actor processes one message at a time, which
//! is what keeps a stock check and its decrement together.
//!
//! | Actor | Entity | Context |
//! |-------|--------|---------|
//! | [`user_actor`] | [`User`](model::User) | none |
//! | [`product_actor`] | [`Product`](model::Product) | `UserClient` |
//! | [`order_actor`] | [`Order`](model::Order) | `UserClient`, `ProductClient` |
//! | [`cart_actor`] | [`Cart`](model::Cart) | `UserClient`, `ProductClient` |
//! | [`review_actor`] | [`Review`](model::Review) | `UserClient`, `ProductClient` |
//! | [`owner_profile_actor`] | [`OwnerProfile`](model::OwnerProfile) | `UserClient` |
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Plain serde types with the camelCase wire shape, plus the order status machine.
//!
//! ### 2. The Actors (`*_actor`)
//! One [`ActorEntity`](actor_framework::ActorEntity) impl per resource, each with its
//! own `thiserror` enum. [`error::Classify`] folds them onto one [`error::ErrorKind`].
//!
//! ### 3. The Interface ([`clients`])
//! Typed clients that check who is calling and hide the message passing.
//! [`OrderClient`](clients::OrderClient) is the order lifecycle API.
//!
//! ### 4. Account Deletion ([`cascade`])
//! [`CascadeCoordinator`](cascade::CascadeCoordinator) stages a user and its
//! dependents in one two-phase transaction.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`BakerySystem`](lifecycle::BakerySystem) spawns and wires every actor, and shuts
//! them down.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```
//!
//! `BAKERY_CHANNEL_BUFFER` and `BAKERY_LOG` tune the system, see [`config`].

#[macro_use]
mod macros;

pub mod cart_actor;
pub mod cascade;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
pub mod owner_profile_actor;
pub mod product_actor;
pub mod review_actor;
pub mod user_actor;
