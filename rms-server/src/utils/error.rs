//! 统一错误处理
//!
//! [`AppError`] 是处理器返回的错误，实现 `IntoResponse`。
//! 响应体为 [`ErrorBody`]：
//!
//! ```json
//! { "code": "E0003", "message": "Order 9b0c... not found" }
//! ```
//!
//! # 错误码规范
//!
//! | 错误码 | 状态码 | 说明 |
//! |--------|--------|------|
//! | E3001 | 401 | 未登录 / 会话无效 (不区分原因) |
//! | E2001 | 403 | 无权限 |
//! | E0002 | 400 | 参数校验失败 |
//! | E0003 | 404 | 资源不存在 |
//! | E0004 | 409 | 唯一约束 / 仍被引用 |
//! | E9001 | 500 | 内部错误 |
//! | E9002 | 500 | 数据库错误 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::{ErrorBody, ParseEnumError};
use tracing::error;
use validator::ValidationErrors;

use crate::db::repository::RepoError;

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (4xx) ==========
    /// 未登录 (401)
    #[error("Authentication required")]
    Unauthorized,

    /// 无权限 (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 资源冲突 (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 验证失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== 系统错误 (5xx) ==========
    /// 数据库错误 (500)
    #[error("Database error: {0}")]
    Database(String),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "E3001",
            AppError::Forbidden(_) => "E2001",
            AppError::Validation(_) => "E0002",
            AppError::NotFound(_) => "E0003",
            AppError::Conflict(_) => "E0004",
            AppError::Internal(_) => "E9001",
            AppError::Database(_) => "E9002",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // ========== Helper Constructors ==========

    /// 所有认证失败共用的 401
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Unauthorized => "unauthorized".to_string(),
            AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
        };

        (self.status(), Json(ErrorBody::new(self.code(), message))).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::InUse(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<ParseEnumError> for AppError {
    fn from(err: ParseEnumError) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_errors_map_to_http_status() {
        let cases = [
            (RepoError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (RepoError::Duplicate("x".into()), StatusCode::CONFLICT),
            (RepoError::InUse("x".into()), StatusCode::CONFLICT),
            (RepoError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (RepoError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (repo, status) in cases {
            assert_eq!(AppError::from(repo).status(), status);
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let response = AppError::database("disk I/O error at page 7").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unauthorized_is_undifferentiated() {
        assert_eq!(AppError::unauthorized().to_string(), "Authentication required");
        assert_eq!(AppError::unauthorized().code(), "E3001");
    }
}
