//! Statistics API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/stats", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/meal-quantity", get(handler::meal_quantity))
        .route("/employee-orders", get(handler::employee_orders))
        .layer(middleware::from_fn(require_admin))
}
