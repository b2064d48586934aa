//! Favorite Restaurant Model

use super::Restaurant;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Join of customer and restaurant, at most one per pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRestaurant {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
}

/// Favorite with the restaurant record fetched, for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRestaurantDetail {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub restaurant: Restaurant,
}
