//! Custom actions for the Product actor.
//!
//! Every stock movement in the system goes through these actions, and each one is a
//! single message to the product's actor, so a check and the decrement that follows it
//! can never interleave with another order for the same product.

use crate::model::UserId;

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Checks and decrements stock in one step.
    ///
    /// `owner_id` must match the product's owner, so an order cannot name one
    /// owner and buy from another.
    ReserveStock { quantity: u32, owner_id: UserId },
    /// Puts stock back after a cancellation.
    ReleaseStock(u32),
}

/// What an order needs back from a successful reservation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockReservation {
    /// Price per unit at the moment of reservation.
    pub unit_price: f64,
    pub remaining: u32,
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    CheckStock(u32),
    ReserveStock(StockReservation),
    /// The stock level after the release.
    ReleaseStock(u32),
}
