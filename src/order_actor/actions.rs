//! Lifecycle actions for the Order actor.
//!
//! Each action names the [`Actor`] performing it; the order checks that the caller is
//! the right party before touching its status.

use crate::model::{Actor, OwnerDecision};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Owner accepts (`pending -> in-progress`) or rejects (`pending -> cancelled`).
    OwnerUpdateStatus {
        by: Actor,
        decision: OwnerDecision,
        estimated_completion_time: Option<DateTime<Utc>>,
    },
    /// Customer accepts or declines the owner's estimate. Declining cancels.
    ConfirmAgreement { by: Actor, agreed: bool },
    /// Owner hands the order over (`in-progress -> delivered`).
    MarkReady {
        by: Actor,
        pickup_location: Option<String>,
        map_url: Option<String>,
    },
    /// Customer cancels an order that is not yet delivered or cancelled.
    Cancel { by: Actor },
    /// Customer attaches the payment screenshot.
    SubmitPayment { by: Actor, screenshot_url: String },
    /// Admin confirms the submitted payment.
    ConfirmPayment { by: Actor },
}

impl OrderAction {
    pub fn by(&self) -> &Actor {
        match self {
            OrderAction::OwnerUpdateStatus { by, .. }
            | OrderAction::ConfirmAgreement { by, .. }
            | OrderAction::MarkReady { by, .. }
            | OrderAction::Cancel { by }
            | OrderAction::SubmitPayment { by, .. }
            | OrderAction::ConfirmPayment { by } => by,
        }
    }
}
