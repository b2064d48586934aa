//! Favorite Restaurant Handlers

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::FavoriteRestaurantDetail;
use crate::db::repository::{FavoriteRepository, RestaurantRepository};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub restaurant_id: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// "added" or "removed"
    pub status: &'static str,
}

/// GET /api/favorites - 当前顾客收藏的餐厅
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<FavoriteRestaurantDetail>>> {
    let customer = user.customer_profile()?;
    let repo = FavoriteRepository::new(state.db.clone());
    let favorites = repo.find_by_customer(&customer).await?;
    Ok(Json(favorites))
}

/// POST /api/favorites/toggle - 收藏 / 取消收藏餐厅
///
/// get-or-create 语义：已存在则删除并返回 removed，否则创建并返回 added。
pub async fn toggle(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ToggleRequest>,
) -> AppResult<Json<ToggleResponse>> {
    let customer = user.customer_profile()?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&req.restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", req.restaurant_id)))?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant has no id"))?;

    let repo = FavoriteRepository::new(state.db.clone());
    match repo.find_pair(&customer, &restaurant_id).await? {
        Some(existing) => {
            let id = existing
                .id
                .ok_or_else(|| AppError::internal("Favorite has no id"))?;
            repo.delete(&id).await?;
            tracing::info!(customer = %customer, restaurant = %restaurant_id, "Favorite removed");
            Ok(Json(ToggleResponse { status: "removed" }))
        }
        None => {
            repo.create(customer.clone(), restaurant_id.clone()).await?;
            tracing::info!(customer = %customer, restaurant = %restaurant_id, "Favorite added");
            Ok(Json(ToggleResponse { status: "added" }))
        }
    }
}
