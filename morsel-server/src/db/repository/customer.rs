//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Customer, CustomerUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const CUSTOMER_TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find customer profile by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let record = parse_record_id(CUSTOMER_TABLE, id)?;
        let customer: Option<Customer> = self.base.db().select(record).await?;
        Ok(customer)
    }

    /// Find the profile linked to an account
    pub async fn find_by_account(&self, account: &RecordId) -> RepoResult<Option<Customer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE account = $account LIMIT 1")
            .bind(("account", account.clone()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create the profile for a newly registered account.
    ///
    /// 档案在注册流程里显式创建，一个 account 只允许一个 customer。
    pub async fn create(&self, account: RecordId) -> RepoResult<Customer> {
        if self.find_by_account(&account).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Account already has a customer profile".to_string(),
            ));
        }

        // Record links must be bound natively, not serialized through the
        // model's string form
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE customer SET
                    account = $account,
                    name = '',
                    nickname = '',
                    phone_number = '',
                    city = '',
                    state = '',
                    country = '',
                    date_of_birth = NONE
                RETURN AFTER"#,
            )
            .bind(("account", account))
            .await?;

        let created: Option<Customer> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    /// Partial profile update
    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
        let record = parse_record_id(CUSTOMER_TABLE, id)?;

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.nickname.is_some() {
            set_parts.push("nickname = $nickname");
        }
        if data.phone_number.is_some() {
            set_parts.push("phone_number = $phone_number");
        }
        if data.city.is_some() {
            set_parts.push("city = $city");
        }
        if data.state.is_some() {
            set_parts.push("state = $state");
        }
        if data.country.is_some() {
            set_parts.push("country = $country");
        }
        if data.date_of_birth.is_some() {
            set_parts.push("date_of_birth = $date_of_birth");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)));
        }

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(&query_str).bind(("record", record));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.nickname {
            query = query.bind(("nickname", v));
        }
        if let Some(v) = data.phone_number {
            query = query.bind(("phone_number", v));
        }
        if let Some(v) = data.city {
            query = query.bind(("city", v));
        }
        if let Some(v) = data.state {
            query = query.bind(("state", v));
        }
        if let Some(v) = data.country {
            query = query.bind(("country", v));
        }
        if let Some(v) = data.date_of_birth {
            query = query.bind(("date_of_birth", v));
        }

        let mut result = query.await?;
        let customers: Vec<Customer> = result.take(0)?;
        customers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }
}
