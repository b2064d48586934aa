//! Order API Handlers
//!
//! 下单本身委托给 checkout::PlacementService (原子事务)；
//! 这里只做参数解析和归属校验。

use std::str::FromStr;

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::checkout::PlacementService;
use crate::core::ServerState;
use crate::db::models::{Order, OrderDetail, OrderStatus, OrderWithItems};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub restaurant_id: String,
    pub delivery_address_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub status: OrderStatus,
}

/// POST /api/orders/place - 将当前购物车转为订单
pub async fn place_order(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<Json<OrderDetail>> {
    let customer = user.customer_profile()?;

    let service = PlacementService::new(state.db.clone(), state.cart_locks.clone());
    let detail = service
        .place_order(&customer, &req.restaurant_id, &req.delivery_address_id)
        .await?;

    Ok(Json(detail))
}

/// GET /api/orders/:id - 订单详情 (含地址、顾客、餐厅、订单行)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let repo = OrderRepository::new(state.db.clone());
    let detail = repo.find_detail(&id).await?;

    // Visible to the ordering customer and the receiving restaurant only;
    // anyone else sees NotFound rather than a confirmation the order exists.
    let profile = user.profile.as_str();
    let is_owner = detail
        .customer
        .id
        .as_ref()
        .is_some_and(|c| c.to_string() == profile)
        || detail
            .restaurant
            .id
            .as_ref()
            .is_some_and(|r| r.to_string() == profile);
    if !is_owner {
        return Err(AppError::not_found(format!("Order {}", id)));
    }

    Ok(Json(detail))
}

/// GET /api/orders/history - 当前顾客的历史订单 (新→旧)
pub async fn order_history(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    let customer = user.customer_profile()?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_customer(&customer).await?;
    Ok(Json(orders))
}

/// POST /api/orders/:id/status - 更新订单状态 (餐厅侧)
///
/// 只校验状态值合法性，七个状态之间可以任意流转。
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<Json<UpdateStatusResponse>> {
    let restaurant = user.restaurant_profile()?;

    let status = OrderStatus::from_str(&req.status)
        .map_err(|_| AppError::validation(format!("Invalid status: {}", req.status)))?;

    let repo = OrderRepository::new(state.db.clone());
    let existing: Order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    if existing.restaurant != restaurant {
        return Err(AppError::not_found(format!("Order {}", id)));
    }

    let order = repo.update_status(&id, status).await?;

    tracing::info!(order = %id, status = %status.as_str(), "Order status updated");
    Ok(Json(UpdateStatusResponse {
        status: order.status,
    }))
}
