//! Dish Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Dish, DishCreate, DishUpdate};
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const DISH_TABLE: &str = "dish";

#[derive(Clone)]
pub struct DishRepository {
    base: BaseRepository,
}

impl DishRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find dish by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Dish>> {
        let record = parse_record_id(DISH_TABLE, id)?;
        let dish: Option<Dish> = self.base.db().select(record).await?;
        Ok(dish)
    }

    /// Find all dishes of a restaurant, ordered by name
    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<Dish>> {
        let dishes: Vec<Dish> = self
            .base
            .db()
            .query("SELECT * FROM dish WHERE restaurant = $restaurant ORDER BY name")
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(dishes)
    }

    /// Create a new dish for a restaurant
    pub async fn create(&self, restaurant: RecordId, data: DishCreate) -> RepoResult<Dish> {
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation(
                "price must be non-negative".to_string(),
            ));
        }

        // restaurant is a record link (native bind); price is stored in its
        // exact string form
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE dish SET
                    restaurant = $restaurant,
                    name = $name,
                    description = $description,
                    ingredients = $ingredients,
                    price = $price,
                    category = $category,
                    is_vegetarian = $is_vegetarian,
                    is_vegan = $is_vegan,
                    is_gluten_free = $is_gluten_free
                RETURN AFTER"#,
            )
            .bind(("restaurant", restaurant))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("ingredients", data.ingredients))
            .bind(("price", data.price.to_string()))
            .bind(("category", data.category))
            .bind(("is_vegetarian", data.is_vegetarian.unwrap_or(false)))
            .bind(("is_vegan", data.is_vegan.unwrap_or(false)))
            .bind(("is_gluten_free", data.is_gluten_free.unwrap_or(false)))
            .await?;

        let created: Option<Dish> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create dish".to_string()))
    }

    /// Partial dish update
    pub async fn update(&self, id: &str, data: DishUpdate) -> RepoResult<Dish> {
        let record = parse_record_id(DISH_TABLE, id)?;

        if let Some(price) = data.price
            && price < Decimal::ZERO
        {
            return Err(RepoError::Validation(
                "price must be non-negative".to_string(),
            ));
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.ingredients.is_some() {
            set_parts.push("ingredients = $ingredients");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.is_vegetarian.is_some() {
            set_parts.push("is_vegetarian = $is_vegetarian");
        }
        if data.is_vegan.is_some() {
            set_parts.push("is_vegan = $is_vegan");
        }
        if data.is_gluten_free.is_some() {
            set_parts.push("is_gluten_free = $is_gluten_free");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Dish {} not found", id)));
        }

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(&query_str).bind(("record", record));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.ingredients {
            query = query.bind(("ingredients", v));
        }
        if let Some(v) = data.price {
            // Bound as a string so the stored form matches the model's serde
            query = query.bind(("price", v.to_string()));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.is_vegetarian {
            query = query.bind(("is_vegetarian", v));
        }
        if let Some(v) = data.is_vegan {
            query = query.bind(("is_vegan", v));
        }
        if let Some(v) = data.is_gluten_free {
            query = query.bind(("is_gluten_free", v));
        }

        let mut result = query.await?;
        let dishes: Vec<Dish> = result.take(0)?;
        dishes
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Dish {} not found", id)))
    }

    /// Hard delete a dish
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record = parse_record_id(DISH_TABLE, id)?;
        let deleted: Option<Dish> = self.base.db().delete(record).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Dish {} not found", id)));
        }
        Ok(())
    }
}
