//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录、桌台登录、会话检查、登出
//! - [`tables`] - 桌台管理接口
//! - [`users`] - 用户管理接口
//! - [`orders`] - 订单接口
//! - [`menus`] - 菜品管理接口
//! - [`settings`] - 系统设置接口

pub mod auth;
pub mod health;
pub mod menus;
pub mod orders;
pub mod settings;
pub mod tables;
pub mod users;

use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
};
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID generator (UUID v4)
#[derive(Clone, Copy)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// HTTP 请求日志中间件
async fn log_request(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = req
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(target: "http_access", %request_id, %method, %path, status = status.as_u16(), latency_ms, "request failed");
    } else {
        tracing::info!(target: "http_access", %request_id, %method, %path, status = status.as_u16(), latency_ms, "request");
    }

    response
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(tables::router())
        .merge(users::router())
        .merge(orders::router())
        .merge(menus::router())
        .merge(settings::router())
}

/// Build the fully configured application: routes, session guard, state and
/// tower-http middleware
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // 会话守卫 - 在路由级别应用，require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(middleware::from_fn(log_request))
        .with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, XRequestId))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(TraceLayer::new_for_http())
                // Cookie 会话需要 credentials，permissive 不够
                .layer(CorsLayer::very_permissive())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_millis(
                    state.config.request_timeout_ms,
                ))),
        )
}
