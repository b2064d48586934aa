//! Cart-to-order conversion
//!
//! 下单是整个系统唯一的多步写入流程，必须原子：
//! 订单创建、订单行插入、购物车状态翻转要么全部提交，要么全部回滚。
//!
//! Two layers of protection against double conversion of the same cart:
//! 1. An in-process mutex per (customer, restaurant) pair, held across the
//!    read-compute-write sequence.
//! 2. A re-check inside the database transaction that every consumed cart row
//!    is still in state `placing`; the transaction THROWs (and rolls back)
//!    if another writer got there first.

pub mod money;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::db::models::{CartItemDetail, OrderDetail};
use crate::db::repository::{
    CartItemRepository, DeliveryAddressRepository, OrderRepository, parse_record_id,
};
use crate::utils::{AppError, AppResult};

const ORDER_TABLE: &str = "order";

/// Per-cart placement locks.
///
/// Keyed by (customer, restaurant); lock entries are created lazily and kept
/// for the process lifetime (the key space is bounded by active user pairs).
#[derive(Debug, Default)]
pub struct CartLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl CartLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the placement lock for a (customer, restaurant) cart
    pub async fn acquire(
        &self,
        customer: &RecordId,
        restaurant: &RecordId,
    ) -> OwnedMutexGuard<()> {
        let key = format!("{customer}|{restaurant}");
        let lock = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

/// Order item payload bound into the placement transaction
#[derive(Debug, serde::Serialize)]
struct OrderItemSeed {
    dish: RecordId,
    quantity: i32,
}

/// Error message thrown inside the placement transaction when the cart rows
/// were consumed by a concurrent placement.
const CART_CHANGED: &str = "cart changed during placement";

/// Cart-to-order conversion service
#[derive(Clone)]
pub struct PlacementService {
    db: Surreal<Db>,
    locks: Arc<CartLocks>,
}

impl PlacementService {
    pub fn new(db: Surreal<Db>, locks: Arc<CartLocks>) -> Self {
        Self { db, locks }
    }

    /// Convert the caller's `placing` cart for one restaurant into an order.
    ///
    /// # Errors
    ///
    /// - Validation "Cart is empty" when no `placing` items exist for the pair
    /// - NotFound when the delivery address is missing or owned by another
    ///   customer
    /// - Conflict when a concurrent placement consumed the cart first
    pub async fn place_order(
        &self,
        customer: &RecordId,
        restaurant_id: &str,
        delivery_address_id: &str,
    ) -> AppResult<OrderDetail> {
        let restaurant = parse_record_id("restaurant", restaurant_id)?;

        // Hold the pair lock across read-compute-write
        let _guard = self.locks.acquire(customer, &restaurant).await;

        let cart_repo = CartItemRepository::new(self.db.clone());
        let cart = cart_repo
            .find_placing_for_restaurant(customer, &restaurant)
            .await?;
        if cart.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        let address_repo = DeliveryAddressRepository::new(self.db.clone());
        let address = address_repo
            .find_by_id(delivery_address_id)
            .await?
            .filter(|a| &a.customer == customer)
            .ok_or_else(|| {
                AppError::not_found(format!("Delivery address {delivery_address_id}"))
            })?;
        let address_id = address
            .id
            .ok_or_else(|| AppError::internal("Delivery address has no id"))?;

        let (total, items, cart_ids) = Self::build_order_lines(&cart)?;

        let order_key = uuid::Uuid::new_v4().simple().to_string();
        let expected = cart_ids.len() as i64;

        tracing::info!(
            customer = %customer,
            restaurant = %restaurant,
            items = items.len(),
            total = %total,
            "Placing order"
        );

        // Steps 4-6 of the conversion as one transaction: create the order,
        // bulk-insert its items, flip the consumed cart rows. The re-check
        // THROWs if any row already left the `placing` state.
        let result = self
            .db
            .query(
                r#"BEGIN TRANSACTION;
                LET $fresh = (SELECT VALUE id FROM cart_item
                    WHERE id IN $cart_ids AND state = 'placing');
                IF array::len($fresh) != $expected {
                    THROW 'cart changed during placement'
                };
                CREATE type::thing('order', $order_key) CONTENT {
                    customer: $customer,
                    restaurant: $restaurant,
                    status: 'new',
                    total_price: $total,
                    delivery_address: $address,
                    created_at: $created_at
                };
                FOR $item IN $items {
                    CREATE order_item CONTENT {
                        order: type::thing('order', $order_key),
                        dish: $item.dish,
                        quantity: $item.quantity
                    };
                };
                UPDATE cart_item
                    SET state = 'placed', order = type::thing('order', $order_key)
                    WHERE id IN $cart_ids;
                COMMIT TRANSACTION;"#,
            )
            .bind(("cart_ids", cart_ids))
            .bind(("expected", expected))
            .bind(("order_key", order_key.clone()))
            .bind(("customer", customer.clone()))
            .bind(("restaurant", restaurant.clone()))
            .bind(("total", total.to_string()))
            .bind(("address", address_id))
            .bind(("created_at", chrono::Utc::now()))
            .bind(("items", items))
            .await
            .map_err(|e| AppError::database(format!("Placement transaction failed: {e}")))?;

        if let Err(e) = result.check() {
            let msg = e.to_string();
            if msg.contains(CART_CHANGED) {
                tracing::warn!(customer = %customer, restaurant = %restaurant,
                    "Concurrent placement detected, transaction rolled back");
                return Err(AppError::conflict("Cart was already placed"));
            }
            return Err(AppError::database(format!(
                "Placement transaction failed: {msg}"
            )));
        }

        let order_repo = OrderRepository::new(self.db.clone());
        let detail = order_repo
            .find_detail_by_record(&RecordId::from_table_key(ORDER_TABLE, order_key))
            .await?;

        tracing::info!(order = ?detail.id, total = %detail.total_price, "Order placed");
        Ok(detail)
    }

    /// Validate every cart line and compute the exact decimal total
    fn build_order_lines(
        cart: &[CartItemDetail],
    ) -> AppResult<(rust_decimal::Decimal, Vec<OrderItemSeed>, Vec<RecordId>)> {
        let mut items = Vec::with_capacity(cart.len());
        let mut cart_ids = Vec::with_capacity(cart.len());
        let mut lines = Vec::with_capacity(cart.len());

        for item in cart {
            money::validate_quantity(item.quantity)?;
            money::validate_price(item.dish.price)?;

            let dish_id = item
                .dish
                .id
                .clone()
                .ok_or_else(|| AppError::internal("Cart item dish has no id"))?;
            let cart_id = item
                .id
                .clone()
                .ok_or_else(|| AppError::internal("Cart item has no id"))?;

            lines.push((item.dish.price, item.quantity));
            items.push(OrderItemSeed {
                dish: dish_id,
                quantity: item.quantity,
            });
            cart_ids.push(cart_id);
        }

        Ok((money::order_total(lines), items, cart_ids))
    }
}
