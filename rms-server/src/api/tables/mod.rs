//! Dining Table API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{MANAGER_ONLY, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // GET /tables is public (table selector), the rest need a session
    let read_routes = Router::new()
        .route("/tables", get(handler::list))
        .route("/tables/count", get(handler::count))
        .route("/tables/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/tables", post(handler::create))
        .route("/tables/{id}", patch(handler::update).delete(handler::delete))
        .route("/tables/status/{id}", patch(handler::update_status))
        .route("/tables/checkout/{id}", patch(handler::checkout))
        .layer(middleware::from_fn(require_role(MANAGER_ONLY)));

    read_routes.merge(manage_routes)
}
