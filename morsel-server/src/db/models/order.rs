//! Order Model
//!
//! 订单在下单时一次性创建；total_price 之后不可变，status 可变。

use super::serde_helpers;
use super::{Customer, DeliveryAddress, Dish, Restaurant};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Order status
///
/// No adjacency constraint between statuses: any of the seven values may be
/// set at any time (the tracker only validates membership).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Preparing,
    OnTheWay,
    Delivered,
    Cancelled,
    PickupReady,
    PickedUp,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OnTheWay => "on_the_way",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::PickupReady => "pickup_ready",
            OrderStatus::PickedUp => "picked_up",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "preparing" => Ok(OrderStatus::Preparing),
            "on_the_way" => Ok(OrderStatus::OnTheWay),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "pickup_ready" => Ok(OrderStatus::PickupReady),
            "picked_up" => Ok(OrderStatus::PickedUp),
            _ => Err(()),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub status: OrderStatus,
    /// Computed once at placement, immutable thereafter
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub delivery_address: Option<RecordId>,
    pub created_at: DateTime<Utc>,
}

/// Order line item, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub dish: RecordId,
    pub quantity: i32,
}

/// Order item with the dish record fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub dish: Dish,
    pub quantity: i32,
}

/// Order with customer, restaurant and delivery address fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    pub customer: Customer,
    pub restaurant: Restaurant,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub delivery_address: Option<DeliveryAddress>,
    pub created_at: DateTime<Utc>,
    /// Attached by the repository, not stored on the order row
    #[serde(default)]
    pub items: Vec<OrderItemDetail>,
}

/// Order with its items attached, for history listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub items: Vec<OrderItemDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for s in [
            "new",
            "preparing",
            "on_the_way",
            "delivered",
            "cancelled",
            "pickup_ready",
            "picked_up",
        ] {
            let status = OrderStatus::from_str(s).expect("known status");
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(OrderStatus::from_str("shipped").is_err());
        assert!(OrderStatus::from_str("NEW").is_err());
        assert!(OrderStatus::from_str("").is_err());
    }

    #[test]
    fn test_status_wire_form_matches_parser() {
        // Stored form and API form must agree
        let json = serde_json::to_value(OrderStatus::OnTheWay).expect("serializable");
        assert_eq!(json, serde_json::json!("on_the_way"));
        let parsed: OrderStatus =
            serde_json::from_value(serde_json::json!("pickup_ready")).expect("deserializable");
        assert_eq!(parsed, OrderStatus::PickupReady);
    }
}
