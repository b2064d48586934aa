//! 下单流程集成测试
//!
//! 使用内存数据库完整走一遍 加购 → 下单 → 状态流转 的链路。

use std::str::FromStr;
use std::sync::Arc;

use morsel_server::AppError;
use morsel_server::checkout::{CartLocks, PlacementService};
use morsel_server::db::DbService;
use morsel_server::db::models::{
    AccountCreate, AccountRole, CartState, DeliveryAddressCreate, DishCategory, DishCreate,
    OrderStatus, RestaurantCreate,
};
use morsel_server::db::repository::{
    AccountRepository, CartItemRepository, CustomerRepository, DeliveryAddressRepository,
    DishRepository, OrderRepository, RestaurantRepository,
};
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

async fn setup_db() -> Surreal<Db> {
    DbService::memory().await.expect("in-memory db").db
}

async fn create_customer(db: &Surreal<Db>, username: &str) -> RecordId {
    let account = AccountRepository::new(db.clone())
        .create(AccountCreate {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "longenough1".to_string(),
            role: AccountRole::Customer,
        })
        .await
        .expect("account created");
    let customer = CustomerRepository::new(db.clone())
        .create(account.id.expect("account id"))
        .await
        .expect("customer created");
    customer.id.expect("customer id")
}

async fn create_restaurant(db: &Surreal<Db>, name: &str) -> RecordId {
    let restaurant = RestaurantRepository::new(db.clone())
        .create(RestaurantCreate {
            account: None,
            name: name.to_string(),
            description: String::new(),
            address: Some("1 Test Street".to_string()),
            phone_number: None,
            opening_time: None,
            closing_time: None,
        })
        .await
        .expect("restaurant created");
    restaurant.id.expect("restaurant id")
}

async fn create_dish(
    db: &Surreal<Db>,
    restaurant: &RecordId,
    name: &str,
    price: &str,
) -> RecordId {
    let dish = DishRepository::new(db.clone())
        .create(
            restaurant.clone(),
            DishCreate {
                name: name.to_string(),
                description: String::new(),
                ingredients: None,
                price: dec(price),
                category: DishCategory::MainCourse,
                is_vegetarian: None,
                is_vegan: None,
                is_gluten_free: None,
            },
        )
        .await
        .expect("dish created");
    dish.id.expect("dish id")
}

async fn create_address(db: &Surreal<Db>, customer: &RecordId) -> RecordId {
    let address = DeliveryAddressRepository::new(db.clone())
        .create(
            customer.clone(),
            DeliveryAddressCreate {
                address_line1: "42 Delivery Road".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                postal_code: "62704".to_string(),
                country: "USA".to_string(),
                is_default: true,
            },
        )
        .await
        .expect("address created");
    address.id.expect("address id")
}

fn placement(db: &Surreal<Db>) -> PlacementService {
    PlacementService::new(db.clone(), Arc::new(CartLocks::new()))
}

#[tokio::test]
async fn test_place_order_reference_scenario() {
    let db = setup_db().await;
    let customer = create_customer(&db, "anna").await;
    let restaurant = create_restaurant(&db, "Golden Wok").await;
    let dish_a = create_dish(&db, &restaurant, "Kung Pao Chicken", "10.99").await;
    let dish_b = create_dish(&db, &restaurant, "Spring Rolls", "8.99").await;
    let address = create_address(&db, &customer).await;

    let cart = CartItemRepository::new(db.clone());
    cart.create(customer.clone(), dish_a, restaurant.clone(), 2)
        .await
        .expect("cart item a");
    cart.create(customer.clone(), dish_b, restaurant.clone(), 1)
        .await
        .expect("cart item b");

    let detail = placement(&db)
        .place_order(&customer, &restaurant.to_string(), &address.to_string())
        .await
        .expect("order placed");

    // total_price = 10.99 × 2 + 8.99 = 30.97, exactly
    assert_eq!(detail.total_price, dec("30.97"));
    assert_eq!(detail.status, OrderStatus::New);
    assert_eq!(detail.items.len(), 2);
    let mut quantities: Vec<i32> = detail.items.iter().map(|i| i.quantity).collect();
    quantities.sort_unstable();
    assert_eq!(quantities, vec![1, 2]);
    assert!(detail.delivery_address.is_some());

    // Every consumed cart item is now `placed` with the order link attached
    let order_id = detail.id.expect("order id");
    let linked = cart
        .find_by_order(&customer, &order_id.to_string())
        .await
        .expect("linked items");
    assert_eq!(linked.len(), 2);
    assert!(linked.iter().all(|i| i.state == CartState::Placed));
    assert!(linked.iter().all(|i| i.order.as_ref() == Some(&order_id)));

    // Nothing left in `placing` for the pair
    let remaining = cart
        .find_placing_for_restaurant(&customer, &restaurant)
        .await
        .expect("remaining cart");
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_place_order_empty_cart_creates_nothing() {
    let db = setup_db().await;
    let customer = create_customer(&db, "bruno").await;
    let restaurant = create_restaurant(&db, "Trattoria Lucia").await;
    let address = create_address(&db, &customer).await;

    let err = placement(&db)
        .place_order(&customer, &restaurant.to_string(), &address.to_string())
        .await
        .expect_err("empty cart must fail");
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let orders = OrderRepository::new(db.clone())
        .find_by_customer(&customer)
        .await
        .expect("order query");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_duplicate_cart_rows_stay_separate() {
    let db = setup_db().await;
    let customer = create_customer(&db, "carla").await;
    let restaurant = create_restaurant(&db, "Taqueria El Paso").await;
    let dish = create_dish(&db, &restaurant, "Carnitas Tacos", "10.99").await;
    let address = create_address(&db, &customer).await;

    let cart = CartItemRepository::new(db.clone());
    cart.create(customer.clone(), dish.clone(), restaurant.clone(), 1)
        .await
        .expect("first row");
    cart.create(customer.clone(), dish.clone(), restaurant.clone(), 1)
        .await
        .expect("second row");

    // No merging: two independent rows
    let placing = cart
        .find_placing_for_restaurant(&customer, &restaurant)
        .await
        .expect("cart query");
    assert_eq!(placing.len(), 2);

    // Both rows are independently consumable by placement
    let detail = placement(&db)
        .place_order(&customer, &restaurant.to_string(), &address.to_string())
        .await
        .expect("order placed");
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.total_price, dec("21.98"));
}

#[tokio::test]
async fn test_foreign_delivery_address_rejected() {
    let db = setup_db().await;
    let customer = create_customer(&db, "dora").await;
    let other = create_customer(&db, "edgar").await;
    let restaurant = create_restaurant(&db, "Golden Wok").await;
    let dish = create_dish(&db, &restaurant, "Jasmine Tea", "3.50").await;
    let foreign_address = create_address(&db, &other).await;

    let cart = CartItemRepository::new(db.clone());
    cart.create(customer.clone(), dish, restaurant.clone(), 1)
        .await
        .expect("cart item");

    let err = placement(&db)
        .place_order(&customer, &restaurant.to_string(), &foreign_address.to_string())
        .await
        .expect_err("foreign address must be rejected");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    // The cart is untouched
    let placing = cart
        .find_placing_for_restaurant(&customer, &restaurant)
        .await
        .expect("cart query");
    assert_eq!(placing.len(), 1);
    assert_eq!(placing[0].state, CartState::Placing);
}

#[tokio::test]
async fn test_missing_delivery_address_rejected() {
    let db = setup_db().await;
    let customer = create_customer(&db, "frida").await;
    let restaurant = create_restaurant(&db, "Golden Wok").await;
    let dish = create_dish(&db, &restaurant, "Spring Rolls", "5.99").await;

    let cart = CartItemRepository::new(db.clone());
    cart.create(customer.clone(), dish, restaurant.clone(), 1)
        .await
        .expect("cart item");

    let err = placement(&db)
        .place_order(&customer, &restaurant.to_string(), "delivery_address:missing")
        .await
        .expect_err("missing address must be rejected");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_concurrent_placement_converts_cart_once() {
    let db = setup_db().await;
    let customer = create_customer(&db, "greta").await;
    let restaurant = create_restaurant(&db, "Golden Wok").await;
    let dish = create_dish(&db, &restaurant, "Kung Pao Chicken", "12.50").await;
    let address = create_address(&db, &customer).await;

    let cart = CartItemRepository::new(db.clone());
    cart.create(customer.clone(), dish, restaurant.clone(), 1)
        .await
        .expect("cart item");

    // Shared lock registry, as in a running server
    let service = placement(&db);
    let restaurant_id = restaurant.to_string();
    let address_id = address.to_string();
    let (first, second) = tokio::join!(
        service.place_order(&customer, &restaurant_id, &address_id),
        service.place_order(&customer, &restaurant_id, &address_id),
    );

    // Exactly one placement wins; the loser sees an empty (already converted)
    // cart or the in-transaction conflict check
    let outcomes = [first, second];
    let ok_count = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok_count, 1, "exactly one placement must succeed");
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(AppError::Validation(_)) | Err(AppError::Conflict(_))
    )));

    let orders = OrderRepository::new(db.clone())
        .find_by_customer(&customer)
        .await
        .expect("order query");
    assert_eq!(orders.len(), 1);
}

#[tokio::test]
async fn test_status_updates() {
    let db = setup_db().await;
    let customer = create_customer(&db, "hanna").await;
    let restaurant = create_restaurant(&db, "Golden Wok").await;
    let dish = create_dish(&db, &restaurant, "Spring Rolls", "5.99").await;
    let address = create_address(&db, &customer).await;

    let cart = CartItemRepository::new(db.clone());
    cart.create(customer.clone(), dish, restaurant.clone(), 1)
        .await
        .expect("cart item");

    let detail = placement(&db)
        .place_order(&customer, &restaurant.to_string(), &address.to_string())
        .await
        .expect("order placed");
    let order_id = detail.id.expect("order id").to_string();

    let orders = OrderRepository::new(db.clone());

    // Any of the seven values is reachable from any other
    for status in [
        OrderStatus::Preparing,
        OrderStatus::OnTheWay,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
    ] {
        let updated = orders
            .update_status(&order_id, status)
            .await
            .expect("status update");
        assert_eq!(updated.status, status);
    }

    // An out-of-vocabulary value never reaches the repository: the handler
    // rejects it at parse time, so the stored status is unchanged
    assert!(OrderStatus::from_str("shipped").is_err());
    let current = orders
        .find_by_id(&order_id)
        .await
        .expect("order query")
        .expect("order exists");
    assert_eq!(current.status, OrderStatus::Delivered);

    // Unknown order id is NotFound
    let err = orders
        .update_status("order:doesnotexist", OrderStatus::Preparing)
        .await
        .expect_err("unknown order");
    assert!(matches!(
        err,
        morsel_server::db::repository::RepoError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_order_history_newest_first() {
    let db = setup_db().await;
    let customer = create_customer(&db, "ines").await;
    let restaurant = create_restaurant(&db, "Golden Wok").await;
    let dish = create_dish(&db, &restaurant, "Spring Rolls", "5.99").await;
    let address = create_address(&db, &customer).await;

    let cart = CartItemRepository::new(db.clone());
    let service = placement(&db);

    cart.create(customer.clone(), dish.clone(), restaurant.clone(), 1)
        .await
        .expect("cart item");
    let first = service
        .place_order(&customer, &restaurant.to_string(), &address.to_string())
        .await
        .expect("first order");

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    cart.create(customer.clone(), dish, restaurant.clone(), 2)
        .await
        .expect("cart item");
    let second = service
        .place_order(&customer, &restaurant.to_string(), &address.to_string())
        .await
        .expect("second order");

    let history = OrderRepository::new(db.clone())
        .find_by_customer(&customer)
        .await
        .expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].order.id, second.id);
    assert_eq!(history[1].order.id, first.id);
    assert_eq!(history[0].items.len(), 1);
    assert_eq!(history[0].items[0].quantity, 2);
}
