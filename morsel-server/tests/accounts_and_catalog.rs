//! 账号注册与购物车/收藏接口的集成测试
//!
//! 直接驱动 handler 函数 (无 HTTP 层)，数据库用内存引擎。

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use morsel_server::api::auth::handler as auth_handler;
use morsel_server::api::cart::handler as cart_handler;
use morsel_server::api::favorites::handler as favorite_handler;
use morsel_server::auth::{CurrentUser, JwtConfig, JwtService};
use morsel_server::db::DbService;
use morsel_server::db::models::AccountRole;
use morsel_server::{AppError, Config, ServerState};

async fn test_state() -> ServerState {
    let db = DbService::memory().await.expect("in-memory db").db;
    let jwt = JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-key-32-chars!".to_string(),
        expiration_minutes: 60,
        issuer: "morsel-server".to_string(),
        audience: "morsel-clients".to_string(),
    });
    ServerState::new(Config::with_overrides("/tmp/morsel-test", 0), db, Arc::new(jwt))
}

fn customer_user(profile: &str) -> CurrentUser {
    CurrentUser {
        id: "account:test".to_string(),
        username: "tester".to_string(),
        role: AccountRole::Customer,
        profile: profile.to_string(),
    }
}

async fn signup_customer(state: &ServerState, username: &str) -> auth_handler::SignupResponse {
    auth_handler::customer_signup(
        State(state.clone()),
        Json(auth_handler::CustomerSignupRequest {
            username: username.to_string(),
            password: "longenough1".to_string(),
            email: format!("{username}@example.com"),
        }),
    )
    .await
    .expect("signup succeeds")
    .0
}

#[tokio::test]
async fn test_customer_signup_creates_profile() {
    let state = test_state().await;
    let response = signup_customer(&state, "anna").await;

    assert!(response.account_id.starts_with("account:"));
    assert!(response.profile_id.starts_with("customer:"));

    // The issued token carries the customer role and profile link
    let claims = state
        .jwt_service
        .validate_token(&response.token)
        .expect("valid token");
    assert_eq!(claims.role, "customer");
    assert_eq!(claims.profile, response.profile_id);
}

#[tokio::test]
async fn test_signup_conflicts() {
    let state = test_state().await;
    signup_customer(&state, "bruno").await;

    // Same username
    let err = auth_handler::customer_signup(
        State(state.clone()),
        Json(auth_handler::CustomerSignupRequest {
            username: "bruno".to_string(),
            password: "longenough1".to_string(),
            email: "other@example.com".to_string(),
        }),
    )
    .await
    .expect_err("duplicate username");
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    // Same email
    let err = auth_handler::customer_signup(
        State(state.clone()),
        Json(auth_handler::CustomerSignupRequest {
            username: "someone-else".to_string(),
            password: "longenough1".to_string(),
            email: "bruno@example.com".to_string(),
        }),
    )
    .await
    .expect_err("duplicate email");
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let state = test_state().await;

    let err = auth_handler::customer_signup(
        State(state.clone()),
        Json(auth_handler::CustomerSignupRequest {
            username: "   ".to_string(),
            password: "longenough1".to_string(),
            email: "x@example.com".to_string(),
        }),
    )
    .await
    .expect_err("blank username");
    assert!(matches!(err, AppError::Validation(_)));

    let err = auth_handler::customer_signup(
        State(state.clone()),
        Json(auth_handler::CustomerSignupRequest {
            username: "carla".to_string(),
            password: "short".to_string(),
            email: "carla@example.com".to_string(),
        }),
    )
    .await
    .expect_err("short password");
    assert!(matches!(err, AppError::Validation(_)));

    let err = auth_handler::customer_signup(
        State(state.clone()),
        Json(auth_handler::CustomerSignupRequest {
            username: "dora".to_string(),
            password: "longenough1".to_string(),
            email: "not-an-email".to_string(),
        }),
    )
    .await
    .expect_err("bad email");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_restaurant_signup_requires_all_fields() {
    let state = test_state().await;

    let err = auth_handler::restaurant_signup(
        State(state.clone()),
        Json(auth_handler::RestaurantSignupRequest {
            username: "lucia".to_string(),
            password: "longenough1".to_string(),
            email: "lucia@example.com".to_string(),
            restaurant_name: "Trattoria Lucia".to_string(),
            address: String::new(),
            phone_number: "555-0100".to_string(),
        }),
    )
    .await
    .expect_err("blank address");
    assert!(matches!(err, AppError::Validation(_)));

    let ok = auth_handler::restaurant_signup(
        State(state.clone()),
        Json(auth_handler::RestaurantSignupRequest {
            username: "lucia".to_string(),
            password: "longenough1".to_string(),
            email: "lucia@example.com".to_string(),
            restaurant_name: "Trattoria Lucia".to_string(),
            address: "88 Via Nuova".to_string(),
            phone_number: "555-0100".to_string(),
        }),
    )
    .await
    .expect("signup succeeds")
    .0;
    assert!(ok.profile_id.starts_with("restaurant:"));
}

#[tokio::test]
async fn test_add_to_cart_validations() {
    use morsel_server::db::models::{DishCategory, DishCreate, RestaurantCreate};
    use morsel_server::db::repository::{DishRepository, RestaurantRepository};
    use rust_decimal::Decimal;

    let state = test_state().await;
    let customer = signup_customer(&state, "erik").await;
    let user = customer_user(&customer.profile_id);

    // Two restaurants, dish belongs to the first
    let restaurants = RestaurantRepository::new(state.db.clone());
    let owning = restaurants
        .create(RestaurantCreate {
            account: None,
            name: "Golden Wok".to_string(),
            description: String::new(),
            address: None,
            phone_number: None,
            opening_time: None,
            closing_time: None,
        })
        .await
        .expect("restaurant")
        .id
        .expect("id");
    let other = restaurants
        .create(RestaurantCreate {
            account: None,
            name: "Taqueria El Paso".to_string(),
            description: String::new(),
            address: None,
            phone_number: None,
            opening_time: None,
            closing_time: None,
        })
        .await
        .expect("restaurant")
        .id
        .expect("id");

    let dish = DishRepository::new(state.db.clone())
        .create(
            owning.clone(),
            DishCreate {
                name: "Spring Rolls".to_string(),
                description: String::new(),
                ingredients: None,
                price: Decimal::new(599, 2),
                category: DishCategory::Appetizer,
                is_vegetarian: None,
                is_vegan: None,
                is_gluten_free: None,
            },
        )
        .await
        .expect("dish")
        .id
        .expect("id");

    // Unknown dish -> NotFound
    let err = cart_handler::add_to_cart(
        State(state.clone()),
        Extension(user.clone()),
        Json(cart_handler::AddToCartRequest {
            dish_id: "dish:missing".to_string(),
            restaurant_id: owning.to_string(),
            quantity: 1,
        }),
    )
    .await
    .expect_err("unknown dish");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    // Restaurant mismatch -> Validation
    let err = cart_handler::add_to_cart(
        State(state.clone()),
        Extension(user.clone()),
        Json(cart_handler::AddToCartRequest {
            dish_id: dish.to_string(),
            restaurant_id: other.to_string(),
            quantity: 1,
        }),
    )
    .await
    .expect_err("restaurant mismatch");
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    // Zero quantity -> Validation
    let err = cart_handler::add_to_cart(
        State(state.clone()),
        Extension(user.clone()),
        Json(cart_handler::AddToCartRequest {
            dish_id: dish.to_string(),
            restaurant_id: owning.to_string(),
            quantity: 0,
        }),
    )
    .await
    .expect_err("zero quantity");
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    // Happy path: denormalized restaurant comes from the dish
    let item = cart_handler::add_to_cart(
        State(state.clone()),
        Extension(user),
        Json(cart_handler::AddToCartRequest {
            dish_id: dish.to_string(),
            restaurant_id: owning.to_string(),
            quantity: 2,
        }),
    )
    .await
    .expect("cart item")
    .0;
    assert_eq!(item.restaurant, owning);
    assert_eq!(item.quantity, 2);
}

#[tokio::test]
async fn test_favorite_toggle_round_trip() {
    use morsel_server::db::models::RestaurantCreate;
    use morsel_server::db::repository::RestaurantRepository;

    let state = test_state().await;
    let customer = signup_customer(&state, "frida").await;
    let user = customer_user(&customer.profile_id);

    let restaurant = RestaurantRepository::new(state.db.clone())
        .create(RestaurantCreate {
            account: None,
            name: "Golden Wok".to_string(),
            description: String::new(),
            address: None,
            phone_number: None,
            opening_time: None,
            closing_time: None,
        })
        .await
        .expect("restaurant")
        .id
        .expect("id");

    let toggle = |state: ServerState, user: CurrentUser, id: String| async move {
        favorite_handler::toggle(
            State(state),
            Extension(user),
            Json(favorite_handler::ToggleRequest { restaurant_id: id }),
        )
        .await
        .expect("toggle")
        .0
    };

    let added = toggle(state.clone(), user.clone(), restaurant.to_string()).await;
    assert_eq!(added.status, "added");

    let listed = favorite_handler::list(State(state.clone()), Extension(user.clone()))
        .await
        .expect("list")
        .0;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].restaurant.name, "Golden Wok");

    let removed = toggle(state.clone(), user.clone(), restaurant.to_string()).await;
    assert_eq!(removed.status, "removed");

    let listed = favorite_handler::list(State(state.clone()), Extension(user))
        .await
        .expect("list")
        .0;
    assert!(listed.is_empty());

    // Unknown restaurant -> NotFound
    let err = favorite_handler::toggle(
        State(state.clone()),
        Extension(customer_user(&customer.profile_id)),
        Json(favorite_handler::ToggleRequest {
            restaurant_id: "restaurant:missing".to_string(),
        }),
    )
    .await
    .expect_err("unknown restaurant");
    assert!(matches!(err, AppError::NotFound(_)));
}
