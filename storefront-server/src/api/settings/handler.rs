//! Store Settings API Handlers

use axum::{Json, extract::State};

use shared::models::{StoreSettings, StoreSettingsUpdate, WeeklySchedule};

use crate::core::ServerState;
use crate::db::repository::store_settings;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
    validate_optional_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/settings - 获取店铺配置
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<StoreSettings>> {
    let settings = store_settings::get_or_create(&state.pool).await?;
    Ok(Json(settings))
}

/// PUT /api/settings - 更新店铺配置
///
/// Schedule 全量校验：任何坏条目整体拒绝，坏数据不落库。
/// 更新成功后通知状态 watcher 立即重算。
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<StoreSettingsUpdate>,
) -> AppResult<Json<StoreSettings>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.nif, "nif", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.website, "website", MAX_URL_LEN)?;
    validate_optional_text(&payload.logo_url, "logo_url", MAX_URL_LEN)?;

    if let Some(schedule) = &payload.schedule {
        WeeklySchedule::validate(schedule).map_err(|e| AppError::validation(e.to_string()))?;
    }

    let settings = store_settings::update(&state.pool, payload).await?;

    // 营业时间可能变化，唤醒状态 watcher
    state.status.notify_settings_changed();

    Ok(Json(settings))
}
