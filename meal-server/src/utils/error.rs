//! 统一错误处理
//!
//! 错误类型和响应结构来自 `shared::error`，这里只补充 handler 常用的包装函数。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Department"))
//!
//! // 返回成功响应
//! Ok(ok(departments))
//! ```

use axum::Json;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 成功响应
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// 成功响应 (自定义消息)
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}

/// 列表响应，附带 `count`
pub fn ok_list<T: Serialize>(items: Vec<T>) -> Json<ApiResponse<Vec<T>>> {
    Json(ApiResponse::list(items))
}

/// 无数据的成功响应
pub fn done(message: impl Into<String>) -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok(message))
}
