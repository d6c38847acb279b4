use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ProductId, UserId};

entity_id!(Review, "review");

/// A customer's rating of an owner, optionally about one of the owner's products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub customer_id: UserId,
    pub owner_id: UserId,
    pub product_id: Option<ProductId>,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub customer_id: UserId,
    pub owner_id: UserId,
    pub product_id: Option<ProductId>,
    pub rating: u8,
    pub comment: String,
}

/// Author-only edit.
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub by: UserId,
    pub rating: Option<u8>,
    pub comment: Option<String>,
}
