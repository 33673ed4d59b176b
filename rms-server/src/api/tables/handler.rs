//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::Count;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatusUpdate};
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// GET /tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(state.pool()).await?;
    Ok(Json(tables))
}

/// GET /tables/count
pub async fn count(State(state): State<ServerState>) -> AppResult<Json<Count>> {
    let count = dining_table::count(state.pool()).await?;
    Ok(Json(Count { count }))
}

/// GET /tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(state.pool(), &id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_payload(&payload)?;
    let table = dining_table::create(state.pool(), payload).await?;
    tracing::info!(table_id = %table.id, name = %table.name, "Dining table created");
    Ok(Json(table))
}

/// PATCH /tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    validate_payload(&payload)?;
    let table = dining_table::update_by_id(state.pool(), &id.to_string(), payload).await?;
    Ok(Json(table))
}

/// DELETE /tables/{id} - 删除桌台，返回删除前的数据
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::delete_by_id(state.pool(), &id.to_string()).await?;
    tracing::info!(table_id = %table.id, name = %table.name, "Dining table deleted");
    Ok(Json(table))
}

/// PATCH /tables/status/{id} - 直接改写桌台状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table =
        dining_table::update_status_by_id(state.pool(), &id.to_string(), payload.status).await?;
    Ok(Json(table))
}

/// PATCH /tables/checkout/{id} - 结束当前用餐并置为空闲
pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::checkout(state.pool(), &id.to_string()).await?;
    tracing::info!(table_id = %table.id, "Table checked out");
    Ok(Json(table))
}
