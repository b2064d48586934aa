//! Cart API 模块

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::add_to_cart))
        .route("/by-order/{order_id}", get(handler::list_by_order))
}
