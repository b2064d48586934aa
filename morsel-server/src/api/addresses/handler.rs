//! Delivery Address Handlers
//!
//! 所有操作都限定在当前顾客自己的地址上。

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{DeliveryAddress, DeliveryAddressCreate, DeliveryAddressUpdate};
use crate::db::repository::DeliveryAddressRepository;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/addresses - 当前顾客的所有配送地址
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<DeliveryAddress>>> {
    let customer = user.customer_profile()?;
    let repo = DeliveryAddressRepository::new(state.db.clone());
    let addresses = repo.find_by_customer(&customer).await?;
    Ok(Json(addresses))
}

/// POST /api/addresses - 新建配送地址
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DeliveryAddressCreate>,
) -> AppResult<Json<DeliveryAddress>> {
    let customer = user.customer_profile()?;

    validate_required_text(&payload.address_line1, "address_line1", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.postal_code, "postal_code", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.country, "country", MAX_SHORT_TEXT_LEN)?;

    let repo = DeliveryAddressRepository::new(state.db.clone());
    let address = repo.create(customer.clone(), payload).await?;

    tracing::info!(customer = %customer, address = ?address.id, "Delivery address created");
    Ok(Json(address))
}

/// PUT /api/addresses/:id - 修改配送地址
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<DeliveryAddressUpdate>,
) -> AppResult<Json<DeliveryAddress>> {
    let customer = user.customer_profile()?;

    validate_optional_text(&payload.address_line1, "address_line1", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.postal_code, "postal_code", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.country, "country", MAX_SHORT_TEXT_LEN)?;

    let repo = DeliveryAddressRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .filter(|a| a.customer == customer)
        .ok_or_else(|| AppError::not_found(format!("Delivery address {}", id)))?;

    let address = repo
        .update(
            &existing
                .id
                .map(|i| i.to_string())
                .ok_or_else(|| AppError::internal("Delivery address has no id"))?,
            payload,
        )
        .await?;

    Ok(Json(address))
}

/// DELETE /api/addresses/:id - 删除配送地址
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let customer = user.customer_profile()?;

    let repo = DeliveryAddressRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .filter(|a| a.customer == customer)
        .ok_or_else(|| AppError::not_found(format!("Delivery address {}", id)))?;

    repo.delete(
        &existing
            .id
            .map(|i| i.to_string())
            .ok_or_else(|| AppError::internal("Delivery address has no id"))?,
    )
    .await?;

    Ok(Json(true))
}
