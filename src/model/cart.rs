use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ProductId, UserId};

entity_id!(Cart, "cart");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A customer's single shopping cart. Line items are unique by product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub customer_id: UserId,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(id: CartId, params: CartCreate) -> Self {
        let mut cart = Self {
            id,
            customer_id: params.customer_id,
            items: Vec::new(),
            updated_at: Utc::now(),
        };
        cart.add(params.first_item);
        cart
    }

    /// Merges into the existing line for the product, or appends a new one.
    pub fn add(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|line| line.product_id == item.product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
        self.updated_at = Utc::now();
    }

    /// Returns false when the product was not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        self.updated_at = Utc::now();
        self.items.len() != before
    }
}

/// A cart is created by its first item.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub customer_id: UserId,
    pub first_item: CartItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_stay_unique_by_product() {
        let mut cart = Cart::new(
            CartId(1),
            CartCreate {
                customer_id: UserId(1),
                first_item: CartItem {
                    product_id: ProductId(1),
                    quantity: 1,
                },
            },
        );
        cart.add(CartItem {
            product_id: ProductId(1),
            quantity: 2,
        });
        cart.add(CartItem {
            product_id: ProductId(2),
            quantity: 1,
        });

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 3);

        assert!(cart.remove(ProductId(2)));
        assert!(!cart.remove(ProductId(2)));
        assert_eq!(cart.items.len(), 1);
    }
}
