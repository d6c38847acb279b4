//! # Order Client
//!
//! The lifecycle API. Placement and every transition run inside the Order actor; this
//! client checks who is calling, turns the wire-level inputs into [`OrderAction`]s,
//! forwards cancellation notices, and assembles listings.
use crate::clients::{ProductClient, UserClient};
use crate::model::{
    Actor, CancellationNotice, Order, OrderCreate, OrderId, OrderView, OwnerDecision,
    PartySummary, ProductId, ProductSummary, Role, UserId,
};
use crate::notify::Notifier;
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, Filter, ResourceClient};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    users: UserClient,
    products: ProductClient,
    notifier: Arc<dyn Notifier>,
}

impl_actor_client!(OrderClient, Order, OrderError);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        users: UserClient,
        products: ProductClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner,
            users,
            products,
            notifier,
        }
    }

    async fn perform(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!(%id, by = %action.by().id, ?action, "Sending action");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Places an order on behalf of `actor`, who must be the named customer.
    ///
    /// Stock is reserved as part of placement; the order starts `pending`.
    #[instrument(
        skip(self, params),
        fields(product_id = %params.product_id, quantity = params.quantity)
    )]
    pub async fn place_order(
        &self,
        actor: Actor,
        params: OrderCreate,
    ) -> Result<OrderId, OrderError> {
        debug!(?params, "place_order called");
        if actor.role != Role::Customer || actor.id != params.customer_id {
            return Err(OrderError::Unauthorized(
                "Only the ordering customer can place an order.".into(),
            ));
        }
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    /// Owner accepts (`"in-progress"`) or rejects (anything else) a pending order.
    #[instrument(skip(self))]
    pub async fn owner_update_status(
        &self,
        actor: Actor,
        id: OrderId,
        status: &str,
        estimated_completion_time: Option<DateTime<Utc>>,
    ) -> Result<Order, OrderError> {
        let decision = OwnerDecision::from_status_signal(status);
        self.perform(
            id,
            OrderAction::OwnerUpdateStatus {
                by: actor,
                decision,
                estimated_completion_time,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn confirm_agreement(
        &self,
        actor: Actor,
        id: OrderId,
        agreed: bool,
    ) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::ConfirmAgreement { by: actor, agreed })
            .await
    }

    #[instrument(skip(self))]
    pub async fn mark_ready(
        &self,
        actor: Actor,
        id: OrderId,
        pickup_location: Option<String>,
        map_url: Option<String>,
    ) -> Result<Order, OrderError> {
        self.perform(
            id,
            OrderAction::MarkReady {
                by: actor,
                pickup_location,
                map_url,
            },
        )
        .await
    }

    /// Customer cancellation. The notice goes to the [`Notifier`]; a delivery failure
    /// is logged and does not affect the cancellation.
    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        actor: Actor,
        id: OrderId,
    ) -> Result<(Order, CancellationNotice), OrderError> {
        let order = self.perform(id, OrderAction::Cancel { by: actor }).await?;
        let notice = CancellationNotice::for_order(&order).ok_or_else(|| {
            OrderError::ActorCommunicationError(format!("{id} cancelled without a timestamp"))
        })?;
        if let Err(e) = self.notifier.order_cancelled(&notice).await {
            warn!(order_id = %id, error = %e, "Cancellation notice not delivered");
        }
        Ok((order, notice))
    }

    #[instrument(skip(self))]
    pub async fn submit_payment(
        &self,
        actor: Actor,
        id: OrderId,
        screenshot_url: String,
    ) -> Result<Order, OrderError> {
        self.perform(
            id,
            OrderAction::SubmitPayment {
                by: actor,
                screenshot_url,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn confirm_payment(&self, actor: Actor, id: OrderId) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::ConfirmPayment { by: actor })
            .await
    }

    /// Like `get`, but a missing order is an error.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// The caller's orders, newest first: owners see what was ordered from them,
    /// customers see what they ordered. Other roles have no order list.
    #[instrument(skip(self))]
    pub async fn list_for(&self, actor: Actor) -> Result<Vec<OrderView>, OrderError> {
        let me = actor.id;
        let filter = match actor.role {
            Role::Owner => Filter::new("owner", move |o: &Order| o.owner_id == me),
            Role::Customer => Filter::new("customer", move |o: &Order| o.customer_id == me),
            Role::Admin | Role::Delivery => {
                return Err(OrderError::Unauthorized(
                    "Only owners and customers have an order list.".into(),
                ))
            }
        };

        let mut orders = self.query(filter).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let mut products: HashMap<ProductId, Option<ProductSummary>> = HashMap::new();
        let mut parties: HashMap<UserId, Option<PartySummary>> = HashMap::new();
        for order in &orders {
            if !products.contains_key(&order.product_id) {
                let product = self.products.get(order.product_id).await?;
                products.insert(order.product_id, product.as_ref().map(ProductSummary::from));
            }
            for user_id in [order.customer_id, order.owner_id] {
                if !parties.contains_key(&user_id) {
                    let user = self.users.get(user_id).await?;
                    parties.insert(user_id, user.as_ref().map(PartySummary::from));
                }
            }
        }

        let views = orders
            .into_iter()
            .map(|order| OrderView {
                product: products.get(&order.product_id).cloned().flatten(),
                customer: parties.get(&order.customer_id).cloned().flatten(),
                owner: parties.get(&order.owner_id).cloned().flatten(),
                order,
            })
            .collect::<Vec<_>>();
        debug!(count = views.len(), "Orders listed");
        Ok(views)
    }
}
