//! Favorite Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{FavoriteRestaurant, FavoriteRestaurantDetail};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const FAVORITE_TABLE: &str = "favorite_restaurant";

#[derive(Clone)]
pub struct FavoriteRepository {
    base: BaseRepository,
}

impl FavoriteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the favorite row for a (customer, restaurant) pair
    pub async fn find_pair(
        &self,
        customer: &RecordId,
        restaurant: &RecordId,
    ) -> RepoResult<Option<FavoriteRestaurant>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM favorite_restaurant \
                 WHERE customer = $customer AND restaurant = $restaurant LIMIT 1",
            )
            .bind(("customer", customer.clone()))
            .bind(("restaurant", restaurant.clone()))
            .await?;
        let favorites: Vec<FavoriteRestaurant> = result.take(0)?;
        Ok(favorites.into_iter().next())
    }

    /// Create a favorite (uniqueness by lookup-before-insert)
    pub async fn create(
        &self,
        customer: RecordId,
        restaurant: RecordId,
    ) -> RepoResult<FavoriteRestaurant> {
        // Both fields are record links and must be bound natively
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE favorite_restaurant SET
                    customer = $customer,
                    restaurant = $restaurant
                RETURN AFTER"#,
            )
            .bind(("customer", customer))
            .bind(("restaurant", restaurant))
            .await?;

        let created: Option<FavoriteRestaurant> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create favorite".to_string()))
    }

    /// Delete a favorite row
    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        let _: Option<FavoriteRestaurant> = self.base.db().delete(id.clone()).await?;
        Ok(())
    }

    /// All favorites of a customer, restaurant fetched
    pub async fn find_by_customer(
        &self,
        customer: &RecordId,
    ) -> RepoResult<Vec<FavoriteRestaurantDetail>> {
        let favorites: Vec<FavoriteRestaurantDetail> = self
            .base
            .db()
            .query("SELECT * FROM favorite_restaurant WHERE customer = $customer FETCH restaurant")
            .bind(("customer", customer.clone()))
            .await?
            .take(0)?;
        Ok(favorites)
    }
}
