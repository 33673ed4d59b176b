//! Setting API 模块
//!
//! `GET /settings/{name}` is public so the login screen can show the
//! restaurant name.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{MANAGER_ONLY, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().route("/settings/{name}", get(handler::get_by_name));

    let manage_routes = Router::new()
        .route("/settings/{name}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_role(MANAGER_ONLY)));

    read_routes.merge(manage_routes)
}
