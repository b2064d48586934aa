//! Dish Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Dish ID type
pub type DishId = RecordId;

/// Menu category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DishCategory {
    Appetizer,
    Salad,
    #[serde(rename = "Main Course")]
    MainCourse,
    Dessert,
    Beverage,
}

/// Dish model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<DishId>,
    /// Record link to the owning restaurant
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Option<String>,
    /// Price in decimal, serialized as a string to avoid float drift
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub category: DishCategory,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
}

/// Create dish payload (restaurant link is taken from the caller's profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub category: DishCategory,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_gluten_free: Option<bool>,
}

/// Partial dish update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
    pub category: Option<DishCategory>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_gluten_free: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_price_serializes_as_string() {
        // Prices travel as exact strings, never as floats
        let payload: DishCreate = serde_json::from_str(
            r#"{
                "name": "Spring Rolls",
                "description": "",
                "price": "5.99",
                "category": "Appetizer"
            }"#,
        )
        .expect("valid payload");
        assert_eq!(payload.price, Decimal::from_str("5.99").expect("decimal"));

        let json = serde_json::to_value(&payload).expect("serializable");
        assert_eq!(json["price"], serde_json::json!("5.99"));
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_value(DishCategory::MainCourse).expect("serializable"),
            serde_json::json!("Main Course")
        );
        assert!(serde_json::from_value::<DishCategory>(serde_json::json!("Soup")).is_err());
    }
}
