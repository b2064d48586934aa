//! Order Repository
//!
//! Reads and status updates. Order creation is transactional and lives in
//! checkout::PlacementService.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{
    Dish, Order, OrderDetail, OrderItemDetail, OrderStatus, OrderWithItems, serde_helpers,
};
use serde::Deserialize;
use std::collections::HashMap;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ORDER_TABLE: &str = "order";

/// Order item row with its order link, used to group items per order
#[derive(Debug, Deserialize)]
struct OrderItemRow {
    #[serde(default, with = "serde_helpers::option_record_id")]
    id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    order: RecordId,
    dish: Dish,
    quantity: i32,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id (links unfetched)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record = parse_record_id(ORDER_TABLE, id)?;
        let order: Option<Order> = self.base.db().select(record).await?;
        Ok(order)
    }

    /// Full order detail: customer, restaurant, delivery address and items
    pub async fn find_detail(&self, id: &str) -> RepoResult<OrderDetail> {
        let record = parse_record_id(ORDER_TABLE, id)?;
        self.find_detail_by_record(&record).await
    }

    /// Same as [`find_detail`](Self::find_detail), id already parsed
    pub async fn find_detail_by_record(&self, record: &RecordId) -> RepoResult<OrderDetail> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE id = $order \
                 FETCH customer, restaurant, delivery_address",
            )
            .bind(("order", record.clone()))
            .await?;
        let orders: Vec<OrderDetail> = result.take(0)?;
        let mut detail = orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", record)))?;

        detail.items = self.find_items(record).await?;
        Ok(detail)
    }

    /// Line items of one order, dish fetched
    pub async fn find_items(&self, order: &RecordId) -> RepoResult<Vec<OrderItemDetail>> {
        let items: Vec<OrderItemDetail> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order = $order FETCH dish")
            .bind(("order", order.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// All orders of a customer with items attached, newest first
    pub async fn find_by_customer(&self, customer: &RecordId) -> RepoResult<Vec<OrderWithItems>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE customer = $customer ORDER BY created_at DESC",
            )
            .bind(("customer", customer.clone()))
            .await?
            .take(0)?;

        self.attach_items(orders).await
    }

    /// All orders of a restaurant with items attached, newest first
    pub async fn find_by_restaurant(
        &self,
        restaurant: &RecordId,
    ) -> RepoResult<Vec<OrderWithItems>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE restaurant = $restaurant ORDER BY created_at DESC",
            )
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;

        self.attach_items(orders).await
    }

    /// Update the status field. Membership in the seven values is the only
    /// constraint; there is no transition-adjacency check.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let record = parse_record_id(ORDER_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $order SET status = $status RETURN AFTER")
            .bind(("order", record))
            .bind(("status", status))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Attach items to a batch of orders with a single IN query
    async fn attach_items(&self, orders: Vec<Order>) -> RepoResult<Vec<OrderWithItems>> {
        let ids: Vec<RecordId> = orders.iter().filter_map(|o| o.id.clone()).collect();
        if ids.is_empty() {
            return Ok(orders
                .into_iter()
                .map(|order| OrderWithItems {
                    order,
                    items: Vec::new(),
                })
                .collect());
        }

        let rows: Vec<OrderItemRow> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order IN $orders FETCH dish")
            .bind(("orders", ids))
            .await?
            .take(0)?;

        let mut by_order: HashMap<String, Vec<OrderItemDetail>> = HashMap::new();
        for row in rows {
            by_order
                .entry(row.order.to_string())
                .or_default()
                .push(OrderItemDetail {
                    id: row.id,
                    dish: row.dish,
                    quantity: row.quantity,
                });
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = order
                    .id
                    .as_ref()
                    .and_then(|id| by_order.remove(&id.to_string()))
                    .unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }
}
