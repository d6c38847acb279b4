//! [`ActorEntity`] implementation for [`Order`]: placement and the status machine.
//!
//! Placement validates both parties through the User actor and reserves stock through
//! the Product actor. Every transition into `cancelled` puts the stock back before the
//! order itself changes, so a failed release leaves the order untouched.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::{ProductClient, UserClient};
use crate::model::{Actor, Order, OrderCreate, OrderId, OrderStatus, OwnerDecision, Role};
use crate::product_actor::ProductError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

impl Order {
    fn require_owner(&self, by: &Actor, what: &str) -> Result<(), OrderError> {
        if by.role == Role::Owner && by.id == self.owner_id {
            Ok(())
        } else {
            Err(OrderError::Unauthorized(format!(
                "Only the order's owner can {what}."
            )))
        }
    }

    fn require_customer(&self, by: &Actor, what: &str) -> Result<(), OrderError> {
        if by.role == Role::Customer && by.id == self.customer_id {
            Ok(())
        } else {
            Err(OrderError::Unauthorized(format!(
                "Only the order's customer can {what}."
            )))
        }
    }

    fn ensure_transition(&self, next: OrderStatus) -> Result<(), OrderError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(OrderError::InvalidState(format!(
                "Order cannot move from {} to {}.",
                self.status, next
            )))
        }
    }

    /// Restores the reserved stock, then marks the order cancelled.
    async fn cancel_and_restock(&mut self, products: &ProductClient) -> Result<(), OrderError> {
        self.ensure_transition(OrderStatus::Cancelled)?;
        match products.release_stock(self.product_id, self.quantity).await {
            Ok(remaining) => {
                info!(
                    order_id = %self.id,
                    product_id = %self.product_id,
                    remaining,
                    "Stock restored"
                )
            }
            Err(ProductError::NotFound(_)) => {
                warn!(
                    order_id = %self.id,
                    product_id = %self.product_id,
                    "Product gone, nothing to restock"
                )
            }
            Err(e) => return Err(e.into()),
        }
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = (UserClient, ProductClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(OrderError::ValidationError(
                "Quantity must be at least 1.".into(),
            ));
        }
        Ok(Order::new(id, params))
    }

    /// Verifies both parties, then reserves stock. The reservation is the last step,
    /// so nothing after it can fail and leave stock decremented without an order.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (users, products) = ctx;
        users.require_role(self.customer_id, Role::Customer).await?;
        users.require_role(self.owner_id, Role::Owner).await?;

        let reservation = products
            .reserve_stock(self.product_id, self.owner_id, self.quantity)
            .await?;
        self.total_price = reservation.unit_price * f64::from(self.quantity);
        info!(
            order_id = %self.id,
            product_id = %self.product_id,
            quantity = self.quantity,
            total_price = self.total_price,
            remaining = reservation.remaining,
            "Order placed"
        );
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(OrderError::InvalidState(
            "Orders change only through lifecycle actions.".into(),
        ))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<Order, Self::Error> {
        let (_, products) = ctx;
        match action {
            OrderAction::OwnerUpdateStatus {
                by,
                decision,
                estimated_completion_time,
            } => {
                self.require_owner(&by, "accept or reject it")?;
                if self.status != OrderStatus::Pending {
                    return Err(OrderError::InvalidState(
                        "Only pending orders can be accepted or rejected.".into(),
                    ));
                }
                match decision {
                    OwnerDecision::Accept => {
                        self.ensure_transition(OrderStatus::InProgress)?;
                        self.status = OrderStatus::InProgress;
                        if estimated_completion_time.is_some() {
                            self.estimated_completion_time = estimated_completion_time;
                        }
                        info!(order_id = %self.id, "Order accepted by owner");
                    }
                    OwnerDecision::Reject => {
                        self.cancel_and_restock(products).await?;
                        info!(order_id = %self.id, "Order rejected by owner");
                    }
                }
            }
            OrderAction::ConfirmAgreement { by, agreed } => {
                self.require_customer(&by, "confirm the estimate")?;
                if self.status != OrderStatus::InProgress {
                    return Err(OrderError::InvalidState(
                        "The owner must accept the order before the estimate can be confirmed."
                            .into(),
                    ));
                }
                if self.customer_agreement_time.is_some() {
                    return Err(OrderError::InvalidState(
                        "The estimate has already been confirmed.".into(),
                    ));
                }
                if agreed {
                    self.customer_agreement_time = Some(Utc::now());
                    info!(order_id = %self.id, "Customer agreed to estimate");
                } else {
                    self.cancel_and_restock(products).await?;
                    info!(order_id = %self.id, "Customer declined estimate");
                }
            }
            OrderAction::MarkReady {
                by,
                pickup_location,
                map_url,
            } => {
                self.require_owner(&by, "mark it as ready")?;
                if self.status != OrderStatus::InProgress {
                    return Err(OrderError::InvalidState(
                        "Order must be in progress before it can be marked as ready.".into(),
                    ));
                }
                self.status = OrderStatus::Delivered;
                self.ready_at = Some(Utc::now());
                self.pickup_location = pickup_location;
                self.map_url = map_url;
                info!(order_id = %self.id, "Order ready");
            }
            OrderAction::Cancel { by } => {
                self.require_customer(&by, "cancel it")?;
                if self.status.is_terminal() {
                    return Err(OrderError::InvalidState(
                        "Order is already delivered or cancelled.".into(),
                    ));
                }
                self.cancel_and_restock(products).await?;
                info!(order_id = %self.id, "Order cancelled by customer");
            }
            OrderAction::SubmitPayment { by, screenshot_url } => {
                self.require_customer(&by, "submit payment")?;
                if self.status != OrderStatus::InProgress || self.customer_agreement_time.is_none()
                {
                    return Err(OrderError::InvalidState(
                        "Payment can only be submitted for an accepted order \
                         after confirming the estimate."
                            .into(),
                    ));
                }
                if self.payment.is_paid {
                    return Err(OrderError::InvalidState("Order is already paid.".into()));
                }
                if screenshot_url.trim().is_empty() {
                    return Err(OrderError::ValidationError(
                        "A payment screenshot is required.".into(),
                    ));
                }
                self.payment.screenshot_url = Some(screenshot_url);
                info!(order_id = %self.id, "Payment proof submitted");
            }
            OrderAction::ConfirmPayment { by } => {
                if by.role != Role::Admin {
                    return Err(OrderError::Unauthorized(
                        "Only an admin can confirm payments.".into(),
                    ));
                }
                if self.status == OrderStatus::Cancelled {
                    return Err(OrderError::InvalidState(
                        "Cannot confirm payment for a cancelled order.".into(),
                    ));
                }
                if self.payment.screenshot_url.is_none() {
                    return Err(OrderError::InvalidState(
                        "No payment proof has been submitted.".into(),
                    ));
                }
                if self.payment.is_paid {
                    return Err(OrderError::InvalidState("Payment already confirmed.".into()));
                }
                self.payment.is_paid = true;
                self.payment.paid_at = Some(Utc::now());
                info!(order_id = %self.id, "Payment confirmed");
            }
        }
        Ok(self.clone())
    }
}
