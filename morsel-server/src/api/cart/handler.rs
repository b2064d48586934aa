//! Cart Handlers
//!
//! 加入购物车永远新建一行 (同一菜品重复添加不合并)；
//! cart_item.restaurant 一律取自菜品所属餐厅，客户端传入的 restaurant_id
//! 只做交叉校验。

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::checkout::money;
use crate::core::ServerState;
use crate::db::models::CartItemDetail;
use crate::db::repository::{CartItemRepository, DishRepository, parse_record_id};
use crate::utils::{AppError, AppResult};

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub dish_id: String,
    pub restaurant_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// POST /api/cart - 加入购物车
pub async fn add_to_cart(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<AddToCartRequest>,
) -> AppResult<Json<CartItemDetail>> {
    let customer = user.customer_profile()?;
    money::validate_quantity(req.quantity)?;

    let dish_repo = DishRepository::new(state.db.clone());
    let dish = dish_repo
        .find_by_id(&req.dish_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Dish {}", req.dish_id)))?;

    // The supplied restaurant must match the dish's owning restaurant
    let requested_restaurant = parse_record_id("restaurant", &req.restaurant_id)?;
    if dish.restaurant != requested_restaurant {
        return Err(AppError::validation(
            "Restaurant ID does not match the dish",
        ));
    }

    let dish_id = dish
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Dish has no id"))?;

    let repo = CartItemRepository::new(state.db.clone());
    let item = repo
        .create(
            customer.clone(),
            dish_id,
            dish.restaurant.clone(),
            req.quantity,
        )
        .await?;

    tracing::info!(
        customer = %customer,
        dish = %req.dish_id,
        quantity = req.quantity,
        "Cart item added"
    );

    Ok(Json(CartItemDetail {
        id: item.id,
        dish,
        restaurant: item.restaurant,
        quantity: item.quantity,
        state: item.state,
        order: item.order,
    }))
}

/// GET /api/cart - 当前顾客的未下单购物车
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<CartItemDetail>>> {
    let customer = user.customer_profile()?;
    let repo = CartItemRepository::new(state.db.clone());
    let items = repo.find_placing(&customer).await?;
    Ok(Json(items))
}

/// GET /api/cart/by-order/:order_id - 历史订单对应的购物车条目 (只读展示)
pub async fn list_by_order(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<CartItemDetail>>> {
    let customer = user.customer_profile()?;
    let repo = CartItemRepository::new(state.db.clone());
    // Scoped to the caller; another customer's order yields an empty list
    let items = repo.find_by_order(&customer, &order_id).await?;
    Ok(Json(items))
}
