//! Sample catalog seeding
//!
//! Inserts a small demo catalog on startup when `SEED_SAMPLE_DATA` is set and
//! the catalog is empty. Idempotent: a non-empty restaurant table skips it.

use crate::db::models::{DishCategory, DishCreate, RestaurantCreate};
use crate::db::repository::{DishRepository, RestaurantRepository};
use crate::utils::AppError;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

struct SampleDish {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    category: DishCategory,
    vegetarian: bool,
}

struct SampleRestaurant {
    name: &'static str,
    description: &'static str,
    address: &'static str,
    dishes: &'static [SampleDish],
}

const SAMPLES: &[SampleRestaurant] = &[
    SampleRestaurant {
        name: "Golden Wok",
        description: "Family-run Cantonese kitchen, wok hei since 1987.",
        address: "12 Lantern Street",
        dishes: &[
            SampleDish {
                name: "Spring Rolls",
                description: "Crispy vegetable rolls with sweet chili dip.",
                price_cents: 599,
                category: DishCategory::Appetizer,
                vegetarian: true,
            },
            SampleDish {
                name: "Kung Pao Chicken",
                description: "Stir-fried chicken, peanuts, dried chilies.",
                price_cents: 1250,
                category: DishCategory::MainCourse,
                vegetarian: false,
            },
            SampleDish {
                name: "Jasmine Tea",
                description: "Pot of loose-leaf jasmine tea.",
                price_cents: 350,
                category: DishCategory::Beverage,
                vegetarian: true,
            },
        ],
    },
    SampleRestaurant {
        name: "Trattoria Lucia",
        description: "Hand-rolled pasta and thin-crust pizza from a wood oven.",
        address: "88 Via Nuova",
        dishes: &[
            SampleDish {
                name: "Caprese Salad",
                description: "Buffalo mozzarella, tomato, basil.",
                price_cents: 899,
                category: DishCategory::Salad,
                vegetarian: true,
            },
            SampleDish {
                name: "Tagliatelle al Ragu",
                description: "Slow-cooked beef ragu over fresh tagliatelle.",
                price_cents: 1499,
                category: DishCategory::MainCourse,
                vegetarian: false,
            },
            SampleDish {
                name: "Tiramisu",
                description: "Espresso-soaked savoiardi, mascarpone cream.",
                price_cents: 699,
                category: DishCategory::Dessert,
                vegetarian: true,
            },
        ],
    },
    SampleRestaurant {
        name: "Taqueria El Paso",
        description: "Street-style tacos, fresh salsas made daily.",
        address: "5 Mercado Lane",
        dishes: &[
            SampleDish {
                name: "Guacamole & Chips",
                description: "Smashed avocado, lime, tortilla chips.",
                price_cents: 650,
                category: DishCategory::Appetizer,
                vegetarian: true,
            },
            SampleDish {
                name: "Carnitas Tacos",
                description: "Three slow-braised pork tacos, onion, cilantro.",
                price_cents: 1099,
                category: DishCategory::MainCourse,
                vegetarian: false,
            },
            SampleDish {
                name: "Horchata",
                description: "Cinnamon rice drink over ice.",
                price_cents: 450,
                category: DishCategory::Beverage,
                vegetarian: true,
            },
        ],
    },
];

/// Seed the sample catalog if the restaurant table is empty
pub async fn seed_catalog(db: &Surreal<Db>) -> Result<(), AppError> {
    let restaurants = RestaurantRepository::new(db.clone());
    if !restaurants.find_all().await.map_err(AppError::from)?.is_empty() {
        tracing::debug!("Catalog not empty, skipping sample data");
        return Ok(());
    }

    let dishes = DishRepository::new(db.clone());
    for sample in SAMPLES {
        let restaurant = restaurants
            .create(RestaurantCreate {
                account: None,
                name: sample.name.to_string(),
                description: sample.description.to_string(),
                address: Some(sample.address.to_string()),
                phone_number: None,
                opening_time: NaiveTime::from_hms_opt(11, 0, 0),
                closing_time: NaiveTime::from_hms_opt(22, 0, 0),
            })
            .await
            .map_err(AppError::from)?;

        let restaurant_id = restaurant
            .id
            .ok_or_else(|| AppError::internal("Seeded restaurant has no id"))?;

        for dish in sample.dishes {
            dishes
                .create(
                    restaurant_id.clone(),
                    DishCreate {
                        name: dish.name.to_string(),
                        description: dish.description.to_string(),
                        ingredients: None,
                        price: Decimal::new(dish.price_cents, 2),
                        category: dish.category,
                        is_vegetarian: Some(dish.vegetarian),
                        is_vegan: None,
                        is_gluten_free: None,
                    },
                )
                .await
                .map_err(AppError::from)?;
        }
    }

    tracing::info!(restaurants = SAMPLES.len(), "Sample catalog seeded");
    Ok(())
}
