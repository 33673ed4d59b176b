//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::Count;
use shared::models::{Menu, MenuCreate, MenuUpdate};
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::menu;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// GET /menus
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Menu>>> {
    Ok(Json(menu::find_all(state.pool()).await?))
}

/// GET /menus/count
pub async fn count(State(state): State<ServerState>) -> AppResult<Json<Count>> {
    let count = menu::count(state.pool()).await?;
    Ok(Json(Count { count }))
}

/// GET /menus/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Menu>> {
    let menu = menu::find_by_id(state.pool(), &id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu {} not found", id)))?;
    Ok(Json(menu))
}

/// POST /menus
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuCreate>,
) -> AppResult<Json<Menu>> {
    validate_payload(&payload)?;
    let menu = menu::create(state.pool(), payload).await?;
    tracing::info!(menu_id = %menu.id, name = %menu.name, "Menu created");
    Ok(Json(menu))
}

/// PATCH /menus/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    validate_payload(&payload)?;
    let menu = menu::update_by_id(state.pool(), &id.to_string(), payload).await?;
    Ok(Json(menu))
}

/// DELETE /menus/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Menu>> {
    let menu = menu::delete_by_id(state.pool(), &id.to_string()).await?;
    tracing::info!(menu_id = %menu.id, name = %menu.name, "Menu deleted");
    Ok(Json(menu))
}
