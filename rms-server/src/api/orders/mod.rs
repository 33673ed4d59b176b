//! Order API 模块
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /orders | GET | 员工 |
//! | /orders | POST | 桌台会话 |
//! | /orders/{id} | GET | 会话 |
//! | /orders/status/{status} | GET | 员工 |
//! | /orders/table/{id} | GET | 会话 (桌台只能看自己的) |
//! | /orders/cancel/{id} | PATCH | 员工 |
//! | /orders/serve/{id} | PATCH | 员工 |
//! | /orders/finish/{id} | PATCH | 员工 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{STAFF_ROLES, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let session_routes = Router::new()
        .route("/orders", post(handler::create))
        .route("/orders/{id}", get(handler::get_by_id))
        .route("/orders/table/{id}", get(handler::list_by_table));

    let staff_routes = Router::new()
        .route("/orders", get(handler::list))
        .route("/orders/status/{status}", get(handler::list_by_status))
        .route("/orders/cancel/{id}", patch(handler::cancel))
        .route("/orders/serve/{id}", patch(handler::serve))
        .route("/orders/finish/{id}", patch(handler::finish))
        .layer(middleware::from_fn(require_role(STAFF_ROLES)));

    session_routes.merge(staff_routes)
}
