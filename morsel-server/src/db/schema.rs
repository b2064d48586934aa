//! Schema definitions
//!
//! Applied at startup; DEFINE statements are idempotent (OVERWRITE).
//! Uniqueness that the application relies on (account identity, one profile
//! per account) is backed by unique indexes; everything else stays schemaless.

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SCHEMA: &str = r#"
DEFINE TABLE OVERWRITE account SCHEMALESS;
DEFINE INDEX OVERWRITE account_username ON account FIELDS username UNIQUE;
DEFINE INDEX OVERWRITE account_email ON account FIELDS email UNIQUE;

DEFINE TABLE OVERWRITE customer SCHEMALESS;
DEFINE INDEX OVERWRITE customer_account ON customer FIELDS account UNIQUE;

DEFINE TABLE OVERWRITE restaurant SCHEMALESS;

DEFINE TABLE OVERWRITE dish SCHEMALESS;
DEFINE INDEX OVERWRITE dish_restaurant ON dish FIELDS restaurant;

DEFINE TABLE OVERWRITE delivery_address SCHEMALESS;
DEFINE INDEX OVERWRITE address_customer ON delivery_address FIELDS customer;

DEFINE TABLE OVERWRITE cart_item SCHEMALESS;
DEFINE INDEX OVERWRITE cart_customer_restaurant ON cart_item FIELDS customer, restaurant, state;

DEFINE TABLE OVERWRITE order SCHEMALESS;
DEFINE INDEX OVERWRITE order_customer ON order FIELDS customer;
DEFINE INDEX OVERWRITE order_restaurant ON order FIELDS restaurant;

DEFINE TABLE OVERWRITE order_item SCHEMALESS;
DEFINE INDEX OVERWRITE order_item_order ON order_item FIELDS order;

DEFINE TABLE OVERWRITE favorite_restaurant SCHEMALESS;
DEFINE INDEX OVERWRITE favorite_pair ON favorite_restaurant FIELDS customer, restaurant;
"#;

/// Apply the schema to a freshly opened database
pub async fn apply(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?;

    tracing::info!("Database schema applied");
    Ok(())
}
