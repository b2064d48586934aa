//! Authentication Handlers
//!
//! Handles login, signup and token issuance for customer and restaurant
//! accounts. A customer account gets its customer profile created explicitly
//! in the same flow (no implicit creation hook).

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{AccountCreate, AccountRole, RestaurantCreate};
use crate::db::repository::{AccountRepository, CustomerRepository, RestaurantRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: AccountRole,
    /// Linked profile record id (customer:... / restaurant:...)
    pub profile: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct CustomerSignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantSignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub restaurant_name: String,
    pub address: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub token: String,
    pub account_id: String,
    /// Created profile record id (customer:... / restaurant:...)
    pub profile_id: String,
}

/// POST /api/auth/login - 登录，签发令牌
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let accounts = AccountRepository::new(state.db.clone());
    let account = accounts.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let account = match account {
        Some(a) => {
            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            a
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let account_id = account
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let profile_id = find_profile_id(&state, &account_id, account.role).await?;

    let token = state
        .jwt_service
        .generate_token(&account_id, &account.username, account.role, &profile_id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        account_id = %account_id,
        username = %account.username,
        role = %account.role.as_str(),
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account_id,
            username: account.username,
            email: account.email,
            role: account.role,
            profile: profile_id,
        },
    }))
}

/// POST /api/auth/customer/signup - 顾客注册
///
/// 创建 account 后紧接着显式创建 customer 档案，再签发令牌。
pub async fn customer_signup(
    State(state): State<ServerState>,
    Json(req): Json<CustomerSignupRequest>,
) -> AppResult<Json<SignupResponse>> {
    validate_required_text(&req.username, "username", MAX_NAME_LEN)?;
    validate_password(&req.password)?;
    validate_email(&req.email)?;

    let accounts = AccountRepository::new(state.db.clone());
    let account = accounts
        .create(AccountCreate {
            username: req.username,
            email: req.email,
            password: req.password,
            role: AccountRole::Customer,
        })
        .await?;

    let account_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Created account has no id"))?;

    // Explicit profile creation at the account-creation boundary
    let customers = CustomerRepository::new(state.db.clone());
    let customer = customers.create(account_id.clone()).await?;
    let profile_id = customer
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Created customer has no id"))?;

    let token = state
        .jwt_service
        .generate_token(
            &account_id.to_string(),
            &account.username,
            account.role,
            &profile_id,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        account_id = %account_id,
        username = %account.username,
        "Customer account created"
    );

    Ok(Json(SignupResponse {
        token,
        account_id: account_id.to_string(),
        profile_id,
    }))
}

/// POST /api/auth/restaurant/signup - 餐厅注册
pub async fn restaurant_signup(
    State(state): State<ServerState>,
    Json(req): Json<RestaurantSignupRequest>,
) -> AppResult<Json<SignupResponse>> {
    validate_required_text(&req.username, "username", MAX_NAME_LEN)?;
    validate_password(&req.password)?;
    validate_email(&req.email)?;
    validate_required_text(&req.restaurant_name, "restaurant_name", MAX_NAME_LEN)?;
    validate_required_text(&req.address, "address", MAX_NAME_LEN)?;
    validate_required_text(&req.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;

    let accounts = AccountRepository::new(state.db.clone());
    let account = accounts
        .create(AccountCreate {
            username: req.username,
            email: req.email,
            password: req.password,
            role: AccountRole::Restaurant,
        })
        .await?;

    let account_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Created account has no id"))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .create(RestaurantCreate {
            account: Some(account_id.clone()),
            name: req.restaurant_name,
            description: String::new(),
            address: Some(req.address),
            phone_number: Some(req.phone_number),
            opening_time: None,
            closing_time: None,
        })
        .await?;
    let profile_id = restaurant
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Created restaurant has no id"))?;

    let token = state
        .jwt_service
        .generate_token(
            &account_id.to_string(),
            &account.username,
            account.role,
            &profile_id,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        account_id = %account_id,
        username = %account.username,
        "Restaurant account created"
    );

    Ok(Json(SignupResponse {
        token,
        account_id: account_id.to_string(),
        profile_id,
    }))
}

/// GET /api/auth/me - 当前账号信息
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let accounts = AccountRepository::new(state.db.clone());
    let account = accounts
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {}", user.id)))?;

    Ok(Json(UserInfo {
        id: user.id,
        username: account.username,
        email: account.email,
        role: account.role,
        profile: user.profile,
    }))
}

/// POST /api/auth/logout - 登出 (无状态令牌，只记录日志)
pub async fn logout(Extension(user): Extension<CurrentUser>) -> AppResult<Json<()>> {
    tracing::info!(
        account_id = %user.id,
        username = %user.username,
        "User logged out"
    );
    Ok(Json(()))
}

/// Look up the profile record id for an account by role
async fn find_profile_id(
    state: &ServerState,
    account_id: &str,
    role: AccountRole,
) -> AppResult<String> {
    let account: surrealdb::RecordId = account_id
        .parse()
        .map_err(|_| AppError::internal(format!("Invalid account id: {account_id}")))?;

    let profile = match role {
        AccountRole::Customer => CustomerRepository::new(state.db.clone())
            .find_by_account(&account)
            .await?
            .and_then(|c| c.id),
        AccountRole::Restaurant => RestaurantRepository::new(state.db.clone())
            .find_by_account(&account)
            .await?
            .and_then(|r| r.id),
    };

    profile
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal(format!("Account {account_id} has no linked profile")))
}
