//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - login / logout: public (logout drops whatever session the cookie names)
/// - /api/check-session: public, reports the current role
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/check-session", get(handler::check_session))
        .route("/api/employee/login", post(handler::employee_login))
        .route("/api/employee/logout", post(handler::logout))
        .route("/api/admin/login", post(handler::admin_login))
        .route("/api/admin/logout", post(handler::logout))
}
