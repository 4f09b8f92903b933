//! Shared types for the meal ordering service
//!
//! Error types, response envelope, and the data models used by the server
//! and its API clients.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
