//! Cart Item Repository
//!
//! 只负责创建和读取。placing → placed 的状态翻转属于下单事务，
//! 由 checkout::PlacementService 执行。

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{CartItem, CartItemDetail};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const CART_TABLE: &str = "cart_item";

#[derive(Clone)]
pub struct CartItemRepository {
    base: BaseRepository,
}

impl CartItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new cart item in state `placing`.
    ///
    /// Repeated calls with the same dish create separate rows; duplicate
    /// entries are never merged.
    pub async fn create(
        &self,
        customer: RecordId,
        dish: RecordId,
        restaurant: RecordId,
        quantity: i32,
    ) -> RepoResult<CartItem> {
        if quantity < 1 {
            return Err(RepoError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        // Record links bound natively; state always starts as `placing`
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE cart_item SET
                    customer = $customer,
                    dish = $dish,
                    restaurant = $restaurant,
                    quantity = $quantity,
                    state = 'placing',
                    order = NONE
                RETURN AFTER"#,
            )
            .bind(("customer", customer))
            .bind(("dish", dish))
            .bind(("restaurant", restaurant))
            .bind(("quantity", quantity))
            .await?;

        let created: Option<CartItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart item".to_string()))
    }

    /// All `placing` items of a customer, dish fetched for display
    pub async fn find_placing(&self, customer: &RecordId) -> RepoResult<Vec<CartItemDetail>> {
        let items: Vec<CartItemDetail> = self
            .base
            .db()
            .query(
                "SELECT * FROM cart_item WHERE customer = $customer AND state = 'placing' FETCH dish",
            )
            .bind(("customer", customer.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// All `placing` items of a customer for one restaurant, dish fetched.
    ///
    /// This is the read side of order placement.
    pub async fn find_placing_for_restaurant(
        &self,
        customer: &RecordId,
        restaurant: &RecordId,
    ) -> RepoResult<Vec<CartItemDetail>> {
        let items: Vec<CartItemDetail> = self
            .base
            .db()
            .query(
                "SELECT * FROM cart_item \
                 WHERE customer = $customer AND restaurant = $restaurant AND state = 'placing' \
                 FETCH dish",
            )
            .bind(("customer", customer.clone()))
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Cart items historically linked to an order (display only).
    ///
    /// Scoped to one customer so callers can never read another customer's
    /// order contents.
    pub async fn find_by_order(
        &self,
        customer: &RecordId,
        order_id: &str,
    ) -> RepoResult<Vec<CartItemDetail>> {
        let order = parse_record_id("order", order_id)?;
        let items: Vec<CartItemDetail> = self
            .base
            .db()
            .query(
                "SELECT * FROM cart_item WHERE customer = $customer AND order = $order FETCH dish",
            )
            .bind(("customer", customer.clone()))
            .bind(("order", order))
            .await?
            .take(0)?;
        Ok(items)
    }
}
