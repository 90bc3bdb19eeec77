//! Cash Register API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{CashRegister, CashRegisterClose, CashRegisterForceClose, CashRegisterOpen};

use crate::core::ServerState;
use crate::db::repository::{branch, cash_register};
use crate::utils::time;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_cash, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Query params for listing register sessions
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn default_limit() -> i32 {
    50
}

/// Query params for the current-open lookup
#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    /// 默认使用门店当前选中的分店
    pub branch_id: Option<i64>,
}

/// GET /api/cash-registers - 钱箱会话列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<CashRegister>>> {
    let tz = state.config.timezone;
    let registers = if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        let start_date = time::parse_date(&start)?;
        let end_date = time::parse_date(&end)?;
        cash_register::find_by_date_range(
            &state.pool,
            time::day_start_millis(start_date, tz),
            time::day_end_millis(end_date, tz),
        )
        .await
    } else {
        cash_register::find_all(&state.pool, query.limit, query.offset).await
    }?;

    Ok(Json(registers))
}

/// GET /api/cash-registers/current - 当前打开的钱箱 (默认当前分店)
pub async fn get_current(
    State(state): State<ServerState>,
    Query(query): Query<CurrentQuery>,
) -> AppResult<Json<Option<CashRegister>>> {
    let branch_id = match query.branch_id {
        Some(id) => id,
        None => state
            .status
            .selected_branch()
            .await
            .ok_or_else(|| AppError::validation("branch_id required: no branch selected"))?,
    };

    let open = cash_register::find_open_by_branch(&state.pool, branch_id)
        .await?
        .into_iter()
        .next();
    Ok(Json(open))
}

/// GET /api/cash-registers/:id - 获取单个会话
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CashRegister>> {
    let register = cash_register::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cash register {} not found", id)))?;
    Ok(Json(register))
}

/// POST /api/cash-registers - 开箱
pub async fn open(
    State(state): State<ServerState>,
    Json(payload): Json<CashRegisterOpen>,
) -> AppResult<Json<CashRegister>> {
    validate_cash(payload.opening_balance, "opening_balance")?;
    validate_required_text(&payload.opened_by, "opened_by", MAX_NAME_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let target = branch::find_by_id(&state.pool, payload.branch_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Branch {} not found", payload.branch_id)))?;
    if !target.is_active {
        return Err(AppError::business_rule(
            "Cannot open a cash register on an inactive branch",
        ));
    }

    let register = cash_register::open(&state.pool, payload).await?;

    // Push-recompute: the storefront flips to accepting without waiting
    // for the next poll tick
    state.status.notify_register_changed();

    Ok(Json(register))
}

/// POST /api/cash-registers/:id/close - 关箱 (盘点现金)
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CashRegisterClose>,
) -> AppResult<Json<CashRegister>> {
    validate_cash(payload.closing_balance, "closing_balance")?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let register = cash_register::close(&state.pool, id, payload).await?;

    state.status.notify_register_changed();

    Ok(Json(register))
}

/// POST /api/cash-registers/:id/force-close - 强制关闭 (不盘点)
pub async fn force_close(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CashRegisterForceClose>,
) -> AppResult<Json<CashRegister>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let register = cash_register::force_close(&state.pool, id, payload).await?;

    state.status.notify_register_changed();

    Ok(Json(register))
}
