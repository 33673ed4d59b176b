//! 认证中间件
//!
//! 为 Cookie 会话认证和角色授权提供 Axum 中间件

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use http::{HeaderMap, Method, Uri};
use shared::models::Role;

use crate::AppError;
use crate::auth::{CurrentClient, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 会话 Cookie 名称
pub const TOKEN_COOKIE: &str = "token";

/// 公共路由 (方法, 路由模板)，无需会话即可访问
///
/// 与 [`MatchedPath`] 比较，因此写路由模板而不是实际路径。
pub const PUBLIC_ROUTES: &[(&str, &str)] = &[
    ("POST", "/auth/login"),
    ("POST", "/auth/table-login"),
    ("GET", "/tables"),
    ("GET", "/settings/{name}"),
    ("GET", "/health"),
];

pub fn is_public_route(method: &Method, matched_path: &str) -> bool {
    PUBLIC_ROUTES
        .iter()
        .any(|(m, p)| method.as_str() == *m && matched_path == *p)
}

/// 认证中间件 - 要求有效会话
///
/// 从 `token` Cookie 提取并验证 JWT。
/// 验证成功后将 [`CurrentClient`] 注入请求扩展。
///
/// # 跳过认证
///
/// - `OPTIONS *` (CORS 预检)
/// - 未匹配的路径 (交给 404)
/// - [`PUBLIC_ROUTES`]
///
/// # 错误处理
///
/// 缺少 Cookie、过期、签名错误、格式错误一律返回同一个 401，
/// 具体原因只写入 `security` 日志。
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string());

    let Some(matched_path) = matched_path else {
        return Ok(next.run(req).await);
    };

    if is_public_route(req.method(), &matched_path) {
        return Ok(next.run(req).await);
    }

    let client = authenticate(req.headers(), &state.jwt_service, req.uri())?;
    req.extensions_mut().insert(client);
    Ok(next.run(req).await)
}

/// 读取 `token` Cookie 并解码为 [`CurrentClient`]
pub(crate) fn authenticate(
    headers: &HeaderMap,
    jwt_service: &JwtService,
    uri: &Uri,
) -> Result<CurrentClient, AppError> {
    let jar = CookieJar::from_headers(headers);
    let Some(token) = jar.get(TOKEN_COOKIE).map(|c| c.value().to_string()) else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", uri));
        return Err(AppError::unauthorized());
    };

    let claims = jwt_service.validate_token(&token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", uri)
        );
        AppError::unauthorized()
    })?;

    CurrentClient::try_from(claims).map_err(|e| {
        security_log!(
            "WARN",
            "auth_malformed_claims",
            error = format!("{}", e),
            uri = format!("{:?}", uri)
        );
        AppError::unauthorized()
    })
}

/// 角色检查中间件 - 要求员工会话且角色在列表中
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/users", get(handler::list))
///     .layer(middleware::from_fn(require_role(MANAGER_ONLY)));
/// ```
///
/// # 错误
///
/// 桌台会话或角色不符返回 403 Forbidden
pub fn require_role(
    roles: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let client = req
                .extensions()
                .get::<CurrentClient>()
                .ok_or(AppError::unauthorized())?;

            match client {
                CurrentClient::User(user) if user.has_role(roles) => {}
                CurrentClient::User(user) => {
                    security_log!(
                        "WARN",
                        "role_denied",
                        user_id = user.id.clone(),
                        username = user.username.clone(),
                        user_role = user.role.as_str()
                    );
                    return Err(AppError::forbidden(format!(
                        "Role {} may not access this resource",
                        user.role
                    )));
                }
                CurrentClient::Table(table) => {
                    security_log!(
                        "WARN",
                        "table_session_denied",
                        usage_id = table.usage_id.clone(),
                        table_id = table.table_id.clone()
                    );
                    return Err(AppError::forbidden("Staff session required"));
                }
            }

            Ok(next.run(req).await)
        })
    }
}
