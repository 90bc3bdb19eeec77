//! Branch API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Branch, BranchCreate, BranchUpdate};

use crate::core::ServerState;
use crate::db::repository::{branch, store_settings};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Query params for listing branches
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 是否包含停用分店 (默认只返回启用的)
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/branches - 分店列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Branch>>> {
    let branches = if query.include_inactive {
        branch::find_all(&state.pool).await
    } else {
        branch::find_active(&state.pool).await
    }?;
    Ok(Json(branches))
}

/// GET /api/branches/:id - 获取单个分店
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Branch>> {
    let found = branch::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Branch {} not found", id)))?;
    Ok(Json(found))
}

/// POST /api/branches - 创建分店
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BranchCreate>,
) -> AppResult<Json<Branch>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload.address.len() > MAX_ADDRESS_LEN {
        return Err(AppError::validation("address is too long"));
    }

    let created = branch::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/branches/:id - 更新分店
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BranchUpdate>,
) -> AppResult<Json<Branch>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let updated = branch::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/branches/:id - 删除分店
///
/// 删除当前选中的分店时清空选择，接单状态立刻回到保底关闭。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = branch::delete(&state.pool, id).await?;

    if deleted && state.status.selected_branch().await == Some(id) {
        store_settings::set_active_branch(&state.pool, None).await?;
        state.status.select_branch(None).await;
    }

    Ok(Json(deleted))
}

/// POST /api/branches/:id/select - 切换门店当前分店
///
/// 持久化选择并唤醒状态 watcher；切换期间状态为 loading (不接单)。
pub async fn select(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Branch>> {
    let found = branch::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Branch {} not found", id)))?;
    if !found.is_active {
        return Err(AppError::business_rule(
            "Cannot select an inactive branch for the storefront",
        ));
    }

    store_settings::set_active_branch(&state.pool, Some(id)).await?;
    state.status.select_branch(Some(id)).await;

    Ok(Json(found))
}
