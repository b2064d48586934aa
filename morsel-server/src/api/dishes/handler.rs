//! Dish API Handlers
//!
//! 创建 / 修改 / 删除只对拥有该菜品的餐厅账号开放；查询公共。

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::checkout::money;
use crate::core::ServerState;
use crate::db::models::{Dish, DishCreate, DishUpdate};
use crate::db::repository::DishRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// GET /api/dishes/:id - 获取单个菜品 (公共)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Dish>> {
    let repo = DishRepository::new(state.db.clone());
    let dish = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Dish {}", id)))?;
    Ok(Json(dish))
}

/// POST /api/dishes - 为当前餐厅创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DishCreate>,
) -> AppResult<Json<Dish>> {
    let restaurant_id = user.restaurant_profile()?;

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.ingredients, "ingredients", MAX_TEXT_LEN)?;
    money::validate_price(payload.price)?;

    let repo = DishRepository::new(state.db.clone());
    let dish = repo.create(restaurant_id.clone(), payload).await?;

    tracing::info!(restaurant = %restaurant_id, dish = ?dish.id, "Dish created");
    Ok(Json(dish))
}

/// PUT /api/dishes/:id - 修改菜品 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<DishUpdate>,
) -> AppResult<Json<Dish>> {
    let restaurant_id = user.restaurant_profile()?;

    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.ingredients, "ingredients", MAX_TEXT_LEN)?;
    if let Some(price) = payload.price {
        money::validate_price(price)?;
    }

    let repo = DishRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Dish {}", id)))?;
    if existing.restaurant != restaurant_id {
        return Err(AppError::forbidden("Cannot edit another restaurant's dish"));
    }

    let dish = repo.update(&id, payload).await?;

    tracing::info!(restaurant = %restaurant_id, dish = %id, "Dish updated");
    Ok(Json(dish))
}

/// DELETE /api/dishes/:id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let restaurant_id = user.restaurant_profile()?;

    let repo = DishRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Dish {}", id)))?;
    if existing.restaurant != restaurant_id {
        return Err(AppError::forbidden(
            "Cannot delete another restaurant's dish",
        ));
    }

    repo.delete(&id).await?;

    tracing::info!(restaurant = %restaurant_id, dish = %id, "Dish deleted");
    Ok(Json(true))
}
