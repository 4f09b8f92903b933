//! Department API Module

mod handler;

use axum::{Router, middleware, routing::{delete, get}};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Department router (admin only)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/departments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::save))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_admin))
}
