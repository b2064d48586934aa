//! Restaurant API 模块

pub mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", restaurant_routes())
}

fn restaurant_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/dashboard", get(handler::dashboard))
        .route("/profile", patch(handler::update_profile))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/dishes", get(handler::list_dishes))
        .route("/{id}/orders", get(handler::list_orders))
}
