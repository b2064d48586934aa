//! Favorite Restaurant API 模块

pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/favorites", favorite_routes())
}

fn favorite_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/toggle", post(handler::toggle))
}
