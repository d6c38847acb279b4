//! # Notifications
//!
//! Outbound email/SMS/push delivery is an external collaborator. The system only
//! produces [`CancellationNotice`] payloads and hands them to a [`Notifier`].

use crate::model::CancellationNotice;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn order_cancelled(&self, notice: &CancellationNotice) -> Result<(), NotifyError>;
}

/// Logs every notice. The default when no delivery channel is configured.
#[derive(Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn order_cancelled(&self, notice: &CancellationNotice) -> Result<(), NotifyError> {
        info!(
            order_id = %notice.order_id,
            owner_id = %notice.owner_id,
            customer_id = %notice.customer_id,
            product_id = %notice.product_id,
            cancelled_at = %notice.cancelled_at,
            "Cancellation notice"
        );
        Ok(())
    }
}

/// Keeps notices in memory for assertions. Can be switched to fail every delivery.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<CancellationNotice>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<CancellationNotice> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn order_cancelled(&self, notice: &CancellationNotice) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            warn!(order_id = %notice.order_id, "Simulated notification failure");
            return Err(NotifyError::Delivery("simulated outage".into()));
        }
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice.clone());
        Ok(())
    }
}
