//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DepartmentResponse, DepartmentSave};

use crate::core::ServerState;
use crate::db::repository::DepartmentRepository;
use crate::utils::{ApiResponse, AppResult, done, ok_list, ok_with_message};

const RESOURCE: &str = "Department";

/// List all departments
pub async fn list(State(state): State<ServerState>) -> Json<ApiResponse<Vec<DepartmentResponse>>> {
    let repo = DepartmentRepository::new(state.db.clone());
    ok_list(repo.find_all().into_iter().map(Into::into).collect())
}

/// Create a department (no id) or update one
pub async fn save(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentSave>,
) -> AppResult<Json<ApiResponse<DepartmentResponse>>> {
    let repo = DepartmentRepository::new(state.db.clone());
    let saved = repo.save(payload)?;
    let message = saved.message(RESOURCE);
    Ok(ok_with_message(saved.record.into(), message))
}

/// Delete a department (unknown ids succeed too)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = DepartmentRepository::new(state.db.clone());
    repo.delete(id)?;
    Ok(done(format!("{RESOURCE} deleted")))
}
