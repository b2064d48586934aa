//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

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
pub use account::AccountRepository;
pub use cart_item::CartItemRepository;
pub use customer::CustomerRepository;
pub use delivery_address::DeliveryAddressRepository;
pub use dish::DishRepository;
pub use favorite::FavoriteRepository;
pub use order::OrderRepository;
pub use restaurant::RestaurantRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// API 传入的 ID 可以是完整的 "table:id"，也可以只是 key 部分；
// parse_record_id 统一解析并校验表名，防止跨表引用。

/// Parse an incoming id into a RecordId of the expected table.
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    if raw.contains(':') {
        let id: RecordId = raw
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {raw}")))?;
        if id.table() != table {
            return Err(RepoError::Validation(format!(
                "Invalid {table} ID: {raw}"
            )));
        }
        Ok(id)
    } else {
        Ok(RecordId::from_table_key(table, raw))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
