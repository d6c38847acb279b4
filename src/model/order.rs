use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{PartySummary, ProductId, ProductSummary, UserId};

entity_id!(Order, "order");

/// Where an order is in its lifecycle.
///
/// ```text
/// pending ──accept──▶ in-progress ──ready──▶ delivered
///    │                     │
///    └──reject──▶ cancelled ◀──disagree / cancel
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (Pending, Cancelled)
                | (InProgress, Delivered)
                | (InProgress, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Open orders block self-service account deletion.
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The owner's answer to a pending order.
///
/// On the wire the owner sends a status string: `"in-progress"` accepts, anything
/// else rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerDecision {
    Accept,
    Reject,
}

impl OwnerDecision {
    pub fn from_status_signal(signal: &str) -> Self {
        if signal.trim() == OrderStatus::InProgress.as_str() {
            OwnerDecision::Accept
        } else {
            OwnerDecision::Reject
        }
    }
}

/// Payment proof uploaded by the customer and confirmed by an admin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub screenshot_url: Option<String>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`order_actor`](crate::order_actor) for the lifecycle actions.
///
/// `total_price` is computed once, from the product price at placement time, and
/// never recalculated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub customer_id: UserId,
    pub owner_id: UserId,
    pub quantity: u32,
    pub total_price: f64,
    pub message: String,
    pub requested_date: Option<NaiveDate>,
    pub phone_number: String,
    pub status: OrderStatus,
    pub estimated_completion_time: Option<DateTime<Utc>>,
    pub customer_agreement_time: Option<DateTime<Utc>>,
    pub pickup_location: Option<String>,
    pub map_url: Option<String>,
    pub ready_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub payment: Payment,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// A fresh pending order. The total is filled in once stock is reserved.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            product_id: params.product_id,
            customer_id: params.customer_id,
            owner_id: params.owner_id,
            quantity: params.quantity,
            total_price: 0.0,
            message: params.message,
            requested_date: params.requested_date,
            phone_number: params.phone_number,
            status: OrderStatus::Pending,
            estimated_completion_time: None,
            customer_agreement_time: None,
            pickup_location: None,
            map_url: None,
            ready_at: None,
            cancelled_at: None,
            payment: Payment::default(),
            created_at: Utc::now(),
        }
    }
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub product_id: ProductId,
    pub owner_id: UserId,
    pub customer_id: UserId,
    pub quantity: u32,
    pub message: String,
    pub requested_date: Option<NaiveDate>,
    pub phone_number: String,
}

/// An order with its product and both parties resolved, as returned by listings.
///
/// A projection is `None` when the referenced record no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub product: Option<ProductSummary>,
    pub customer: Option<PartySummary>,
    pub owner: Option<PartySummary>,
}

/// What the notification collaborator receives when a customer cancels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationNotice {
    pub order_id: OrderId,
    pub owner_id: UserId,
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub cancelled_at: DateTime<Utc>,
}

impl CancellationNotice {
    /// `None` unless the order has actually been cancelled.
    pub fn for_order(order: &Order) -> Option<Self> {
        Some(Self {
            order_id: order.id,
            owner_id: order.owner_id,
            customer_id: order.customer_id,
            product_id: order.product_id,
            cancelled_at: order.cancelled_at?,
        })
    }
}
