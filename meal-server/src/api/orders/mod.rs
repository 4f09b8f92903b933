//! Admin Order Routes
//!
//! 管理员代订、修改、取消及导出，不受截止时间限制。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list).post(handler::create).put(handler::update),
        )
        .route("/cancel", post(handler::cancel))
        .route("/export", get(handler::export))
        .layer(middleware::from_fn(require_admin))
}
