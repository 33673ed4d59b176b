//! User API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{MANAGER_ONLY, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // Any session may read the count (dashboard summary)
    let count_routes = Router::new().route("/users/count", get(handler::count));

    let manage_routes = Router::new()
        .route("/users", get(handler::list).post(handler::create))
        .route(
            "/users/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(MANAGER_ONLY)));

    count_routes.merge(manage_routes)
}
