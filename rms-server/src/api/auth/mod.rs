//! 认证路由
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /auth/login | POST | 无 |
//! | /auth/table-login | POST | 无 |
//! | /auth/check-session | GET | 会话 |
//! | /auth/logout | POST | 会话 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/auth/login", post(handler::login))
        .route("/auth/table-login", post(handler::table_login))
        .route("/auth/check-session", get(handler::check_session))
        .route("/auth/logout", post(handler::logout))
}
