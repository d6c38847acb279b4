//! # System Lifecycle & Orchestration
//!
//! [`BakerySystem`] creates every actor, wires them together, and shuts them down.
//!
//! ## Wiring
//!
//! Actors are constructed without dependencies; the clients they need are handed to
//! `run(context)` afterwards. The dependency graph is acyclic:
//!
//! ```text
//! orders   ──▶ users, products
//! carts    ──▶ users, products
//! reviews  ──▶ users, products
//! products ──▶ users
//! profiles ──▶ users
//! users    (no dependencies)
//! ```
//!
//! ## Graceful Shutdown
//!
//! Dropping every client closes the actors' channels. Each actor drains its queue and
//! exits; when it exits it drops the clients in its context, which lets the actors it
//! depends on exit in turn. Clients cloned out of the system must be dropped before
//! [`BakerySystem::shutdown`] is awaited.

pub mod bakery_system;

pub use bakery_system::*;
