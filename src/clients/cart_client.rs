//! # Cart Client
//!
//! Upsert-on-first-add carts. Finding a customer's cart and then creating or changing
//! it takes two messages, so cart mutations are serialized through a gate shared by
//! every clone of this client; two concurrent first adds cannot create two carts.
use crate::cart_actor::{CartAction, CartError};
use crate::model::{Actor, Cart, CartCreate, CartItem, ProductId, Role, UserId};
use actor_framework::{ActorClient, Filter, ResourceClient};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    gate: Arc<Mutex<()>>,
}

impl_actor_client!(CartClient, Cart, CartError);

fn require_customer(actor: &Actor) -> Result<(), CartError> {
    if actor.role == Role::Customer {
        Ok(())
    } else {
        Err(CartError::Unauthorized("Only customers have carts.".into()))
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self {
            inner,
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// The customer's cart, if they have one.
    #[instrument(skip(self))]
    pub async fn cart_for(&self, customer_id: UserId) -> Result<Option<Cart>, CartError> {
        let carts = self
            .query(Filter::new("customer", move |c: &Cart| c.customer_id == customer_id))
            .await?;
        Ok(carts.into_iter().next())
    }

    /// Adds `quantity` of a product, creating the cart on first use.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        actor: Actor,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        require_customer(&actor)?;
        let item = CartItem {
            product_id,
            quantity,
        };
        let _guard = self.gate.lock().await;
        match self.cart_for(actor.id).await? {
            Some(cart) => {
                debug!(cart_id = %cart.id, "Adding to existing cart");
                self.inner
                    .perform_action(cart.id, CartAction::AddItem(item))
                    .await
                    .map_err(Self::map_error)
            }
            None => {
                let id = self
                    .inner
                    .create(CartCreate {
                        customer_id: actor.id,
                        first_item: item,
                    })
                    .await
                    .map_err(Self::map_error)?;
                info!(cart_id = %id, customer_id = %actor.id, "Cart created");
                self.get(id)
                    .await?
                    .ok_or_else(|| CartError::NotFound(id.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        actor: Actor,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        require_customer(&actor)?;
        let _guard = self.gate.lock().await;
        let cart = self
            .cart_for(actor.id)
            .await?
            .ok_or_else(|| CartError::NotFound(format!("cart of {}", actor.id)))?;
        self.inner
            .perform_action(cart.id, CartAction::RemoveItem(product_id))
            .await
            .map_err(Self::map_error)
    }

    /// Deletes the cart wholesale. Clearing a customer without a cart is a no-op.
    #[instrument(skip(self))]
    pub async fn clear(&self, actor: Actor) -> Result<(), CartError> {
        require_customer(&actor)?;
        let _guard = self.gate.lock().await;
        if let Some(cart) = self.cart_for(actor.id).await? {
            self.delete(cart.id).await?;
            info!(cart_id = %cart.id, "Cart cleared");
        }
        Ok(())
    }
}
