//! Setting API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Setting, SettingUpdate};

use crate::core::ServerState;
use crate::db::repository::setting;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// GET /settings/{name}
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Setting>> {
    let setting = setting::find_by_name(state.pool(), &name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Setting {} not found", name)))?;
    Ok(Json(setting))
}

/// PUT /settings/{name}
pub async fn update(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(payload): Json<SettingUpdate>,
) -> AppResult<Json<Setting>> {
    validate_payload(&payload)?;
    let setting = setting::upsert(state.pool(), &name, &payload.value).await?;
    tracing::info!(name = %setting.name, "Setting updated");
    Ok(Json(setting))
}
