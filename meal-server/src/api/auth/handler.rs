//! Authentication Handlers
//!
//! Handles login, logout, and session checks

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use http::header::SET_COOKIE;
use shared::client::{AdminLoginRequest, EmployeeLoginRequest, SessionInfo};
use shared::models::EmployeeProfile;

use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{MaybeSession, Session, verify_employee};
use crate::core::ServerState;
use crate::db::repository::EmployeeRepository;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, done, ok, ok_with_message};

/// Employee login
///
/// Starts a session and sets the `meal_session` cookie
pub async fn employee_login(
    State(state): State<ServerState>,
    Json(req): Json<EmployeeLoginRequest>,
) -> AppResult<Response> {
    if req.emp_id.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Employee ID and password are required"));
    }

    let repo = EmployeeRepository::new(state.db.clone());
    let Some(employee) = verify_employee(&repo, &req.emp_id, &req.password) else {
        security_log!("WARN", "login_failed", emp_id = req.emp_id.as_str());
        return Err(AppError::invalid_credentials());
    };

    let session_id = state.sessions.create(Session::Employee {
        emp_id: employee.emp_id.clone(),
        emp_name: employee.name.clone(),
    });
    tracing::info!(emp_id = %employee.emp_id, "Employee logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&session_id))],
        ok_with_message(EmployeeProfile::from(&employee), "Login successful"),
    )
        .into_response())
}

/// Administrator login
pub async fn admin_login(
    State(state): State<ServerState>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<Response> {
    let account = req.account.trim();
    if !state.admin.verify(account, &req.password) {
        security_log!("WARN", "admin_login_failed", account = account);
        return Err(AppError::invalid_credentials());
    }

    let session_id = state.sessions.create(Session::Admin {
        account: account.to_string(),
    });
    security_log!("INFO", "admin_login", account = account);

    let info = SessionInfo::Admin {
        account: account.to_string(),
    };
    Ok((
        [(SET_COOKIE, session_cookie(&session_id))],
        ok_with_message(info, "Login successful"),
    )
        .into_response())
}

/// Logout handler (both roles)
///
/// Always succeeds and clears the cookie
pub async fn logout(
    State(state): State<ServerState>,
    MaybeSession(current): MaybeSession,
) -> Response {
    if let Some(current) = current {
        if state.sessions.remove(&current.id).is_some() {
            tracing::info!(admin = current.session.is_admin(), "Logged out");
        }
    }
    ([(SET_COOKIE, clear_session_cookie())], done("Logged out")).into_response()
}

/// Who is logged in, if anyone
pub async fn check_session(MaybeSession(current): MaybeSession) -> Json<ApiResponse<SessionInfo>> {
    ok(current
        .map(|c| c.session.info())
        .unwrap_or(SessionInfo::Anonymous))
}
