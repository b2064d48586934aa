//! Delivery Address Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{DeliveryAddress, DeliveryAddressCreate, DeliveryAddressUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ADDRESS_TABLE: &str = "delivery_address";

#[derive(Clone)]
pub struct DeliveryAddressRepository {
    base: BaseRepository,
}

impl DeliveryAddressRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find address by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DeliveryAddress>> {
        let record = parse_record_id(ADDRESS_TABLE, id)?;
        let address: Option<DeliveryAddress> = self.base.db().select(record).await?;
        Ok(address)
    }

    /// Find all addresses of a customer
    pub async fn find_by_customer(&self, customer: &RecordId) -> RepoResult<Vec<DeliveryAddress>> {
        let addresses: Vec<DeliveryAddress> = self
            .base
            .db()
            .query("SELECT * FROM delivery_address WHERE customer = $customer")
            .bind(("customer", customer.clone()))
            .await?
            .take(0)?;
        Ok(addresses)
    }

    /// Create a new address for a customer
    pub async fn create(
        &self,
        customer: RecordId,
        data: DeliveryAddressCreate,
    ) -> RepoResult<DeliveryAddress> {
        // customer is a record link and must be bound natively
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE delivery_address SET
                    customer = $customer,
                    address_line1 = $address_line1,
                    city = $city,
                    state = $state,
                    postal_code = $postal_code,
                    country = $country,
                    is_default = $is_default
                RETURN AFTER"#,
            )
            .bind(("customer", customer))
            .bind(("address_line1", data.address_line1))
            .bind(("city", data.city))
            .bind(("state", data.state))
            .bind(("postal_code", data.postal_code))
            .bind(("country", data.country))
            .bind(("is_default", data.is_default))
            .await?;

        let created: Option<DeliveryAddress> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create delivery address".to_string()))
    }

    /// Partial address update
    pub async fn update(
        &self,
        id: &str,
        data: DeliveryAddressUpdate,
    ) -> RepoResult<DeliveryAddress> {
        let record = parse_record_id(ADDRESS_TABLE, id)?;

        let mut set_parts: Vec<&str> = Vec::new();
        if data.address_line1.is_some() {
            set_parts.push("address_line1 = $address_line1");
        }
        if data.city.is_some() {
            set_parts.push("city = $city");
        }
        if data.state.is_some() {
            set_parts.push("state = $state");
        }
        if data.postal_code.is_some() {
            set_parts.push("postal_code = $postal_code");
        }
        if data.country.is_some() {
            set_parts.push("country = $country");
        }
        if data.is_default.is_some() {
            set_parts.push("is_default = $is_default");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Delivery address {} not found", id)));
        }

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(&query_str).bind(("record", record));

        if let Some(v) = data.address_line1 {
            query = query.bind(("address_line1", v));
        }
        if let Some(v) = data.city {
            query = query.bind(("city", v));
        }
        if let Some(v) = data.state {
            query = query.bind(("state", v));
        }
        if let Some(v) = data.postal_code {
            query = query.bind(("postal_code", v));
        }
        if let Some(v) = data.country {
            query = query.bind(("country", v));
        }
        if let Some(v) = data.is_default {
            query = query.bind(("is_default", v));
        }

        let mut result = query.await?;
        let addresses: Vec<DeliveryAddress> = result.take(0)?;
        addresses
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Delivery address {} not found", id)))
    }

    /// Hard delete an address
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record = parse_record_id(ADDRESS_TABLE, id)?;
        let deleted: Option<DeliveryAddress> = self.base.db().delete(record).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!(
                "Delivery address {} not found",
                id
            )));
        }
        Ok(())
    }
}
