//! [`ActorEntity`] implementation for [`Cart`].

use super::error::CartError;
use crate::clients::{ProductClient, UserClient};
use crate::model::{Cart, CartCreate, CartId, CartItem, ProductId, Role};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub enum CartAction {
    AddItem(CartItem),
    RemoveItem(ProductId),
}

async fn check_item(products: &ProductClient, item: &CartItem) -> Result<(), CartError> {
    if item.quantity == 0 {
        return Err(CartError::ValidationError("Quantity must be at least 1.".into()));
    }
    products.get_product(item.product_id).await?;
    Ok(())
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = (UserClient, ProductClient);
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id, params))
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (users, products) = ctx;
        users.require_role(self.customer_id, Role::Customer).await?;
        for item in &self.items {
            check_item(products, item).await?;
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &Self::Context,
    ) -> Result<Cart, Self::Error> {
        let (_, products) = ctx;
        match action {
            CartAction::AddItem(item) => {
                check_item(products, &item).await?;
                self.add(item);
            }
            CartAction::RemoveItem(product_id) => {
                if !self.remove(product_id) {
                    return Err(CartError::NotFound(format!("{product_id} in {}", self.id)));
                }
            }
        }
        Ok(self.clone())
    }
}
