//! Order Window API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{OrderWindowResponse, OrderWindowSave};

use crate::core::ServerState;
use crate::db::repository::OrderWindowRepository;
use crate::utils::{ApiResponse, AppResult, done, ok_list, ok_with_message};

const RESOURCE: &str = "Order window";

pub async fn list(State(state): State<ServerState>) -> Json<ApiResponse<Vec<OrderWindowResponse>>> {
    let repo = OrderWindowRepository::new(state.db.clone());
    ok_list(repo.find_all().into_iter().map(Into::into).collect())
}

pub async fn save(
    State(state): State<ServerState>,
    Json(payload): Json<OrderWindowSave>,
) -> AppResult<Json<ApiResponse<OrderWindowResponse>>> {
    let repo = OrderWindowRepository::new(state.db.clone());
    let saved = repo.save(payload)?;
    let message = saved.message(RESOURCE);
    Ok(ok_with_message(saved.record.into(), message))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = OrderWindowRepository::new(state.db.clone());
    repo.delete(id)?;
    Ok(done(format!("{RESOURCE} deleted")))
}
