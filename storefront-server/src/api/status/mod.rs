//! Storefront Status API 模块 (接单状态)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/status", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_current))
        .route("/refresh", post(handler::refresh))
}
