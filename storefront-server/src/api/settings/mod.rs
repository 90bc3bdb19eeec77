//! Store Settings API 模块 (店铺信息 + 营业时间)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/settings",
        get(handler::get).put(handler::update),
    )
}
