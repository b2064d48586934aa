//! Cart Item Model
//!
//! 购物车条目。下单时状态 placing → placed 并挂上 order link，不删除行。

use super::Dish;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Cart item state
///
/// `placing` = editable, uncommitted; `placed` = finalized into an order.
/// The only legal transition is placing → placed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CartState {
    Placing,
    Placed,
}

/// Cart item model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub dish: RecordId,
    /// Denormalized from the dish's owning restaurant, never client-supplied
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub quantity: i32,
    pub state: CartState,
    /// Set when the item is consumed by order placement
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub order: Option<RecordId>,
}

/// Cart item with the dish record fetched, for display and checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemDetail {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub dish: Dish,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub quantity: i32,
    pub state: CartState,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub order: Option<RecordId>,
}
