//! Authentication Handlers
//!
//! Staff login, table login, session check and logout. The session token
//! travels in the `token` cookie only.

use std::time::Duration;

use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::models::User;
use shared::{LoginRequest, SessionInfo, TableLoginRequest, TableLoginResponse};

use crate::AppError;
use crate::auth::{CurrentClient, TOKEN_COOKIE, verify_password};
use crate::core::ServerState;
use crate::db::repository::{dining_table, usage, user};
use crate::security_log;
use crate::utils::validation::validate_payload;

fn session_cookie(state: &ServerState, token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(time::Duration::seconds(state.jwt_service.lifetime_seconds()))
        .build()
}

/// Fixed delay applied before every login verdict
async fn auth_delay(state: &ServerState) {
    if state.config.auth_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.config.auth_delay_ms)).await;
    }
}

/// POST /auth/login - 员工登录
///
/// Unknown username and wrong password produce the same 401.
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<User>), AppError> {
    validate_payload(&req)?;

    let record = user::find_by_username(state.pool(), &req.username).await?;

    auth_delay(&state).await;

    let record = match record {
        Some(record) => {
            let password_valid = verify_password(&req.password, &record.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !password_valid {
                security_log!("WARN", "login_failed", username = req.username.clone(), reason = "invalid_password");
                return Err(AppError::unauthorized());
            }
            record
        }
        None => {
            security_log!("WARN", "login_failed", username = req.username.clone(), reason = "user_not_found");
            return Err(AppError::unauthorized());
        }
    };

    let token = state
        .jwt_service
        .generate_user_token(&record.id, &record.username, record.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %record.id,
        username = %record.username,
        role = %record.role,
        "User logged in successfully"
    );

    Ok((jar.add(session_cookie(&state, token)), Json(User::from(record))))
}

/// POST /auth/table-login - 桌台点餐端登录
///
/// Opens (or reuses) the table's usage and marks the table EATING.
pub async fn table_login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(req): Json<TableLoginRequest>,
) -> Result<(CookieJar, Json<TableLoginResponse>), AppError> {
    validate_payload(&req)?;
    let table_id = req.id.to_string();

    let record = dining_table::find_by_id_with_passcode(state.pool(), &table_id).await?;

    auth_delay(&state).await;

    let Some(record) = record else {
        security_log!("WARN", "table_login_failed", table_id = table_id.clone(), reason = "table_not_found");
        return Err(AppError::unauthorized());
    };
    let passcode_valid = verify_password(&req.passcode, &record.passcode)
        .map_err(|e| AppError::internal(format!("Passcode verification failed: {}", e)))?;
    if !passcode_valid {
        security_log!("WARN", "table_login_failed", table_id = table_id.clone(), reason = "invalid_passcode");
        return Err(AppError::unauthorized());
    }

    let usage = usage::open_or_get_active(state.pool(), &table_id).await?;
    let table = dining_table::find_by_id(state.pool(), &table_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))?;

    let token = state
        .jwt_service
        .generate_table_token(&usage.id, &table.id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(table_id = %table.id, usage_id = %usage.id, "Table session started");

    Ok((
        jar.add(session_cookie(&state, token)),
        Json(TableLoginResponse {
            usage_id: usage.id,
            table,
        }),
    ))
}

/// GET /auth/check-session - 返回当前会话
pub async fn check_session(client: CurrentClient) -> Json<SessionInfo> {
    Json(client.session_info())
}

/// POST /auth/logout - 清除会话 Cookie
pub async fn logout(client: CurrentClient, jar: CookieJar) -> (CookieJar, Json<()>) {
    tracing::info!(client_id = %client.id(), kind = ?client.kind(), "Client logged out");

    let mut cookie = Cookie::from(TOKEN_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Json(()))
}
