//! Order API 模块

pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/place", post(handler::place_order))
        .route("/history", get(handler::order_history))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", post(handler::update_status))
}
