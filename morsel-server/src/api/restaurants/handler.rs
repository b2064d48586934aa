//! Restaurant API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Dish, OrderWithItems, Restaurant, RestaurantUpdate};
use crate::db::repository::{
    DishRepository, OrderRepository, RestaurantRepository, parse_record_id,
};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/restaurants - 获取所有餐厅 (公共)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurants = repo.find_all().await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/:id - 获取单个餐厅 (公共)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", id)))?;
    Ok(Json(restaurant))
}

/// GET /api/restaurants/:id/dishes - 餐厅菜单 (公共)
pub async fn list_dishes(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Dish>>> {
    let restaurant_repo = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurant_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", id)))?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant has no id"))?;

    let dish_repo = DishRepository::new(state.db.clone());
    let dishes = dish_repo.find_by_restaurant(&restaurant_id).await?;
    Ok(Json(dishes))
}

/// GET /api/restaurants/dashboard - 当前餐厅账号的餐厅信息
pub async fn dashboard(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Restaurant>> {
    let profile_id = user.restaurant_profile()?;
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo
        .find_by_id(&profile_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", profile_id)))?;
    Ok(Json(restaurant))
}

/// PATCH /api/restaurants/profile - 更新餐厅信息 (部分字段)
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    let profile_id = user.restaurant_profile()?;

    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;

    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo.update(&profile_id.to_string(), payload).await?;

    tracing::info!(restaurant = %profile_id, "Restaurant profile updated");
    Ok(Json(restaurant))
}

/// GET /api/restaurants/:id/orders - 餐厅订单列表 (仅本餐厅账号)
pub async fn list_orders(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    let profile_id = user.restaurant_profile()?;
    let requested = parse_record_id("restaurant", &id)?;
    if requested != profile_id {
        return Err(AppError::forbidden(
            "Cannot view orders of another restaurant",
        ));
    }

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_restaurant(&profile_id).await?;
    Ok(Json(orders))
}
