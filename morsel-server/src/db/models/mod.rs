//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod account;
pub mod customer;

// Catalog
pub mod dish;
pub mod restaurant;

// Commerce
pub mod cart_item;
pub mod delivery_address;
pub mod favorite;
pub mod order;

// Re-exports
pub use account::{Account, AccountCreate, AccountId, AccountRole};
pub use cart_item::{CartItem, CartItemDetail, CartState};
pub use customer::{Customer, CustomerId, CustomerUpdate};
pub use delivery_address::{DeliveryAddress, DeliveryAddressCreate, DeliveryAddressUpdate};
pub use dish::{Dish, DishCategory, DishCreate, DishId, DishUpdate};
pub use favorite::{FavoriteRestaurant, FavoriteRestaurantDetail};
pub use order::{
    Order, OrderDetail, OrderId, OrderItem, OrderItemDetail, OrderStatus, OrderWithItems,
};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
