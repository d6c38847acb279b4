use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::UserId;
use crate::product_actor::ProductError;

entity_id!(Product, "product");

/// A baked good listed by exactly one owner.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`product_actor`](crate::product_actor) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
///
/// # Stock
/// `available_quantity` and `is_active` only change together, through
/// [`Product::adjust_stock`]. A product is active exactly when it has stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub price: f64,
    available_quantity: u32,
    is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            owner_id: params.owner_id,
            name: params.name,
            description: params.description,
            price: params.price,
            available_quantity: params.available_quantity,
            is_active: params.available_quantity > 0,
            created_at: Utc::now(),
        }
    }

    pub fn available_quantity(&self) -> u32 {
        self.available_quantity
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// The only writer of the stock counter. Applies `delta` and recomputes
    /// `is_active` in the same step, returning the new quantity.
    ///
    /// Fails without changing anything when the result would be negative or overflow.
    pub fn adjust_stock(&mut self, delta: i64) -> Result<u32, ProductError> {
        let next = i64::from(self.available_quantity) + delta;
        if next < 0 {
            return Err(ProductError::InsufficientStock {
                requested: u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX),
                available: self.available_quantity,
            });
        }
        let next = u32::try_from(next).map_err(|_| ProductError::InvalidQuantity(u32::MAX))?;
        self.available_quantity = next;
        self.is_active = next > 0;
        Ok(next)
    }
}

/// The product fields shown next to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// Payload for listing a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available_quantity: u32,
}

/// Owner-only edit. `by` is checked against the product's owner.
///
/// A new `available_quantity` is applied through [`Product::adjust_stock`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub by: UserId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available_quantity: Option<u32>,
}

impl ProductUpdate {
    pub fn by(owner: UserId) -> Self {
        Self {
            by: owner,
            name: None,
            description: None,
            price: None,
            available_quantity: None,
        }
    }
}
