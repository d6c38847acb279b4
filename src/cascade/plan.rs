//! Cascade plans, one per kind of account.

use crate::model::{Cart, Order, OwnerProfile, Product, Review, Role, User};
use serde::Serialize;
use std::fmt;

/// What has to go when a user goes. Selected once, from the user's role.
///
/// | Plan | Removes, besides the user |
/// |------|---------------------------|
/// | `Owner` | owner profile, products, orders and reviews on its products, reviews of the owner |
/// | `Customer` | orders placed, cart, reviews written, reviews about the user |
/// | `Account` | reviews about the user |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadePlan {
    Owner,
    Customer,
    Account,
}

impl CascadePlan {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Owner => CascadePlan::Owner,
            Role::Customer => CascadePlan::Customer,
            Role::Admin | Role::Delivery => CascadePlan::Account,
        }
    }
}

impl fmt::Display for CascadePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CascadePlan::Owner => "owner",
            CascadePlan::Customer => "customer",
            CascadePlan::Account => "account",
        };
        f.write_str(name)
    }
}

/// Snapshots of everything a transaction has staged, as returned by the prepares.
#[derive(Debug, Default)]
pub struct Staged {
    pub users: Vec<User>,
    pub profiles: Vec<OwnerProfile>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub carts: Vec<Cart>,
    pub reviews: Vec<Review>,
}

impl Staged {
    pub fn report(&self) -> CascadeReport {
        CascadeReport {
            users: self.users.len(),
            owner_profiles: self.profiles.len(),
            products: self.products.len(),
            orders: self.orders.len(),
            carts: self.carts.len(),
            reviews: self.reviews.len(),
        }
    }
}

/// Per-collection deletion counts of a committed cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub users: usize,
    pub owner_profiles: usize,
    pub products: usize,
    pub orders: usize,
    pub carts: usize,
    pub reviews: usize,
}

impl CascadeReport {
    pub fn total(&self) -> usize {
        self.users + self.owner_profiles + self.products + self.orders + self.carts + self.reviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_plan_per_role() {
        assert_eq!(CascadePlan::for_role(Role::Owner), CascadePlan::Owner);
        assert_eq!(CascadePlan::for_role(Role::Customer), CascadePlan::Customer);
        assert_eq!(CascadePlan::for_role(Role::Admin), CascadePlan::Account);
        assert_eq!(CascadePlan::for_role(Role::Delivery), CascadePlan::Account);
    }
}
