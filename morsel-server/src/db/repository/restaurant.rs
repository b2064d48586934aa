//! Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const RESTAURANT_TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all restaurants, ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant ORDER BY name")
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    /// Find restaurant by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let record = parse_record_id(RESTAURANT_TABLE, id)?;
        let restaurant: Option<Restaurant> = self.base.db().select(record).await?;
        Ok(restaurant)
    }

    /// Find the restaurant linked to an account
    pub async fn find_by_account(&self, account: &RecordId) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE account = $account LIMIT 1")
            .bind(("account", account.clone()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Create a new restaurant
    pub async fn create(&self, data: RestaurantCreate) -> RepoResult<Restaurant> {
        // account is a record link and must be bound natively
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE restaurant SET
                    account = $account,
                    name = $name,
                    description = $description,
                    address = $address,
                    phone_number = $phone_number,
                    opening_time = $opening_time,
                    closing_time = $closing_time
                RETURN AFTER"#,
            )
            .bind(("account", data.account))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("address", data.address))
            .bind(("phone_number", data.phone_number))
            .bind(("opening_time", data.opening_time))
            .bind(("closing_time", data.closing_time))
            .await?;

        let created: Option<Restaurant> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Partial restaurant update
    pub async fn update(&self, id: &str, data: RestaurantUpdate) -> RepoResult<Restaurant> {
        let record = parse_record_id(RESTAURANT_TABLE, id)?;

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.address.is_some() {
            set_parts.push("address = $address");
        }
        if data.phone_number.is_some() {
            set_parts.push("phone_number = $phone_number");
        }
        if data.opening_time.is_some() {
            set_parts.push("opening_time = $opening_time");
        }
        if data.closing_time.is_some() {
            set_parts.push("closing_time = $closing_time");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)));
        }

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(&query_str).bind(("record", record));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.address {
            query = query.bind(("address", v));
        }
        if let Some(v) = data.phone_number {
            query = query.bind(("phone_number", v));
        }
        if let Some(v) = data.opening_time {
            query = query.bind(("opening_time", v));
        }
        if let Some(v) = data.closing_time {
            query = query.bind(("closing_time", v));
        }

        let mut result = query.await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        restaurants
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }
}
