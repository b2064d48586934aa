//! Restaurant Model

use super::serde_helpers;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Restaurant ID type
pub type RestaurantId = RecordId;

/// Restaurant model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RestaurantId>,
    /// Record link to account (absent for unclaimed sample restaurants)
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub account: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub account: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
}

/// Partial restaurant update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
}
