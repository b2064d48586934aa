//! Account Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Account, AccountCreate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ACCOUNT_TABLE: &str = "account";

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Account>> {
        let record = parse_record_id(ACCOUNT_TABLE, id)?;
        let account: Option<Account> = self.base.db().select(record).await?;
        Ok(account)
    }

    /// Find account by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Create a new account
    ///
    /// Duplicate username/email is checked before insertion so the caller gets
    /// a typed Duplicate error instead of a raw index violation.
    pub async fn create(&self, data: AccountCreate) -> RepoResult<Account> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        let hash_pass = Account::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    username = $username,
                    email = $email,
                    hash_pass = $hash_pass,
                    role = $role,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("email", data.email))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role))
            .bind(("created_at", Utc::now()))
            .await?;

        let created: Option<Account> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }
}
