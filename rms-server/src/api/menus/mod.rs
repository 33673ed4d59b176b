//! Menu API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{MANAGER_ONLY, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // Table sessions read the menu to order from it
    let read_routes = Router::new()
        .route("/menus", get(handler::list))
        .route("/menus/count", get(handler::count))
        .route("/menus/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/menus", post(handler::create))
        .route("/menus/{id}", patch(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(MANAGER_ONLY)));

    read_routes.merge(manage_routes)
}
