//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{EmployeeResponse, EmployeeSave};

use crate::core::ServerState;
use crate::db::repository::EmployeeRepository;
use crate::utils::{ApiResponse, AppResult, done, ok_list, ok_with_message};

const RESOURCE: &str = "Employee";

/// List all employees, in stored order
pub async fn list(State(state): State<ServerState>) -> Json<ApiResponse<Vec<EmployeeResponse>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    ok_list(repo.find_all().into_iter().map(Into::into).collect())
}

/// Create or update an employee
pub async fn save(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeSave>,
) -> AppResult<Json<ApiResponse<EmployeeResponse>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let saved = repo.save(payload)?;
    let message = saved.message(RESOURCE);
    Ok(ok_with_message(saved.record.into(), message))
}

/// Delete an employee
///
/// Orders placed by the employee are kept.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    repo.delete(id)?;
    Ok(done(format!("{RESOURCE} deleted")))
}
