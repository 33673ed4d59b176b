//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::Count;
use shared::models::{User, UserCreate, UserUpdate};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// GET /users - 获取所有用户 (不含密码)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = user::find_all(state.pool()).await?;
    Ok(Json(users))
}

/// GET /users/count
pub async fn count(State(state): State<ServerState>) -> AppResult<Json<Count>> {
    let count = user::count(state.pool()).await?;
    Ok(Json(Count { count }))
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = user::find_by_id(state.pool(), &id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user))
}

/// POST /users - 创建用户
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    validate_payload(&payload)?;
    let user = user::create(state.pool(), payload).await?;
    tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
    Ok(Json(user))
}

/// PATCH /users/{id} - 更新用户
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    validate_payload(&payload)?;
    let user = user::update_by_id(state.pool(), &id.to_string(), payload).await?;
    Ok(Json(user))
}

/// DELETE /users/{id} - 删除用户，返回删除前的数据
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let id = id.to_string();
    if current.id == id {
        return Err(AppError::validation("Cannot delete your own account"));
    }
    let user = user::delete_by_id(state.pool(), &id).await?;
    tracing::info!(user_id = %user.id, username = %user.username, deleted_by = %current.username, "User deleted");
    Ok(Json(user))
}
