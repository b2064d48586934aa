//! Delivery Address Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Delivery address, many per customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddress {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Record link to the owning customer
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    /// At most one conceptual default per customer, not enforced by the store
    #[serde(default)]
    pub is_default: bool,
}

/// Create payload (customer link is taken from the caller's profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddressCreate {
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Partial update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeliveryAddressUpdate {
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
}
