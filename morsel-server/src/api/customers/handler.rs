//! Customer Profile Handlers

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Customer, CustomerUpdate};
use crate::db::repository::CustomerRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/customers/profile - 当前顾客档案
pub async fn profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Customer>> {
    let profile_id = user.customer_profile()?;
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&profile_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {}", profile_id)))?;
    Ok(Json(customer))
}

/// PATCH /api/customers/profile - 更新顾客档案 (部分字段)
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    let profile_id = user.customer_profile()?;

    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.nickname, "nickname", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.country, "country", MAX_SHORT_TEXT_LEN)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.update(&profile_id.to_string(), payload).await?;

    tracing::info!(customer = %profile_id, "Customer profile updated");
    Ok(Json(customer))
}
