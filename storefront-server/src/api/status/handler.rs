//! Storefront Status API Handlers

use axum::{Json, extract::State};

use shared::models::RestaurantStatus;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/status - 当前接单状态
///
/// The storefront polls this endpoint and disables all order affordances
/// whenever `can_accept_orders` is false.
pub async fn get_current(State(state): State<ServerState>) -> AppResult<Json<RestaurantStatus>> {
    Ok(Json(state.status.current()))
}

/// POST /api/status/refresh - 立即重算 (管理后台操作后强制刷新)
pub async fn refresh(State(state): State<ServerState>) -> AppResult<Json<RestaurantStatus>> {
    Ok(Json(state.status.refresh().await))
}
