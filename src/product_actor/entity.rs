//! [`ActorEntity`] implementation for [`Product`].
//!
//! Listing a product verifies, through the User actor, that the named owner really
//! has the owner role. Stock changes are delegated to [`Product::adjust_stock`].

use super::actions::{ProductAction, ProductActionResult, StockReservation};
use super::error::ProductError;
use crate::clients::UserClient;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, Role};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::info;

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(format!("Invalid price: {price}")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = UserClient;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("Name must not be empty".into()));
        }
        validate_price(params.price)?;
        Ok(Product::new(id, params))
    }

    async fn on_create(&mut self, users: &UserClient) -> Result<(), Self::Error> {
        users.require_role(self.owner_id, Role::Owner).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _users: &UserClient,
    ) -> Result<(), Self::Error> {
        if update.by != self.owner_id {
            return Err(ProductError::Unauthorized(
                "Only the product's owner can edit it.".into(),
            ));
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ProductError::ValidationError("Name must not be empty".into()));
            }
        }

        if let Some(target) = update.available_quantity {
            let delta = i64::from(target) - i64::from(self.available_quantity());
            self.adjust_stock(delta)?;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _users: &UserClient,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => {
                Ok(ProductActionResult::CheckStock(self.available_quantity()))
            }
            ProductAction::ReserveStock { quantity, owner_id } => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if owner_id != self.owner_id {
                    return Err(ProductError::ValidationError(format!(
                        "Product {} does not belong to {}",
                        self.id, owner_id
                    )));
                }
                let remaining = self.adjust_stock(-i64::from(quantity))?;
                if remaining == 0 {
                    info!(product_id = %self.id, "Stock exhausted, product deactivated");
                }
                Ok(ProductActionResult::ReserveStock(StockReservation {
                    unit_price: self.price,
                    remaining,
                }))
            }
            ProductAction::ReleaseStock(quantity) => {
                let remaining = self.adjust_stock(i64::from(quantity))?;
                Ok(ProductActionResult::ReleaseStock(remaining))
            }
        }
    }
}
