//! # Actor Framework
//!
//! Resource-oriented actors on Tokio: one [`ResourceActor`] task owns every entity of
//! one type, and typed [`ResourceClient`] handles talk to it over channels.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the domain type, its payloads and its business rules.
//! 2. **Runtime** ([`ResourceActor`]) - the message loop that owns the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - cloneable, typed request senders.
//! 4. **Coordination** ([`Transaction`]) - all-or-nothing deletions spanning several actors.
//!
//! ## Requests
//!
//! | Request | Effect |
//! |---------|--------|
//! | `Create` | builds the entity, runs `on_create`, stores it under a fresh sequential id |
//! | `Get` / `Query` | reads one entity by id / every entity matching a [`Filter`] |
//! | `Update` | runs `on_update` against the stored entity |
//! | `Delete` | runs `on_delete`, then removes the entity |
//! | `Action` | runs `handle_action` with a resource-specific command |
//! | `Prepare` / `Commit` / `Abort` | the two-phase deletion protocol, see [`transaction`] |
//!
//! ## Concurrency Model
//!
//! Messages to one actor are processed one at a time, so a hook that checks and then
//! mutates its entity (e.g. "enough stock? then decrement") cannot interleave with
//! another request to the same actor. Different actors run in parallel. Hooks may await
//! other actors through clients injected as the actor's `Context`; the dependency graph
//! between actors must stay acyclic.
//!
//! ## Errors
//!
//! Hooks return the entity's own error type. The actor boxes it into
//! [`FrameworkError::EntityError`] and typed clients recover it with
//! [`FrameworkError::downcast_entity`], so the original variant and message reach the caller.
//!
//! ## Testing
//!
//! See the [`mock`] module for [`MockClient`](mock::MockClient) and failure injection.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod filter;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod transaction;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use filter::Filter;
pub use message::{ResourceRequest, Response};
pub use transaction::{Participant, Transaction, TxId};
