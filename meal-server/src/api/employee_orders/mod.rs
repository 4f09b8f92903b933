//! Employee Self-Service Order Routes
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/employee/today-orders | GET | 今日午/晚餐及截止状态 |
//! | /api/employee/order | POST | 订餐 |
//! | /api/employee/cancel-order | POST | 取消订餐 |
//! | /api/employee/weekly-orders | GET/POST | 周视图 / 批量保存 |
//! | /api/employee/history | GET | 历史订单 |
//!
//! 所有路由要求员工会话 (401)。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_employee;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employee", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/today-orders", get(handler::today_orders))
        .route("/order", post(handler::create))
        .route("/cancel-order", post(handler::cancel))
        .route(
            "/weekly-orders",
            get(handler::weekly_orders).post(handler::save_weekly_orders),
        )
        .route("/history", get(handler::history))
        .layer(middleware::from_fn(require_employee))
}
