//! Session Extractors
//!
//! 在处理函数中直接取得当前会话。优先读取守卫中间件注入的
//! [`CurrentClient`]；未经过守卫时自行验证 Cookie。

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::middleware::authenticate;
use crate::auth::{CurrentClient, CurrentTable, CurrentUser};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(client) = parts.extensions.get::<CurrentClient>() {
            return Ok(client.clone());
        }

        let client = authenticate(&parts.headers, &state.jwt_service, &parts.uri)?;
        parts.extensions.insert(client.clone());
        Ok(client)
    }
}

/// 员工会话；桌台会话返回 403
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match CurrentClient::from_request_parts(parts, state).await? {
            CurrentClient::User(user) => Ok(user),
            CurrentClient::Table(_) => Err(AppError::forbidden("Staff session required")),
        }
    }
}

/// 桌台会话；员工会话返回 403
impl FromRequestParts<ServerState> for CurrentTable {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match CurrentClient::from_request_parts(parts, state).await? {
            CurrentClient::Table(table) => Ok(table),
            CurrentClient::User(_) => Err(AppError::forbidden("Table session required")),
        }
    }
}
