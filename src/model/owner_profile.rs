use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::UserId;

entity_id!(OwnerProfile, "profile");

/// Storefront metadata for a user with the owner role. At most one per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    pub id: OwnerProfileId,
    pub user_id: UserId,
    pub company_name: String,
    pub description: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfileCreate {
    pub user_id: UserId,
    pub company_name: String,
    pub description: String,
}

/// Edit by the profile's owner.
#[derive(Debug, Clone)]
pub struct OwnerProfileUpdate {
    pub by: UserId,
    pub company_name: Option<String>,
    pub description: Option<String>,
}
