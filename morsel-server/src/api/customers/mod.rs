//! Customer Profile API 模块

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/customers/profile",
        get(handler::profile).patch(handler::update_profile),
    )
}
