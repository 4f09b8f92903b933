//! 认证中间件
//!
//! 会话 cookie 解析与角色检查

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::session::{Session, SessionLookup, session_id_from_headers};
use crate::core::ServerState;
use crate::security_log;

/// Session resolved for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSession {
    pub id: String,
    pub session: Session,
}

/// Marker: the request carried a session cookie that has expired
#[derive(Debug, Clone, Copy)]
pub struct ExpiredSession;

/// 会话解析中间件 - 全局层
///
/// 从 `meal_session` cookie 读取会话，成功后注入 [`CurrentSession`]。
/// 不拒绝任何请求，拒绝由 [`require_employee`] / [`require_admin`] 完成。
pub async fn resolve_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(id) = session_id_from_headers(req.headers()) {
        match state.sessions.lookup(&id) {
            SessionLookup::Active(session) => {
                req.extensions_mut().insert(CurrentSession { id, session });
            }
            SessionLookup::Expired => {
                tracing::debug!(uri = %req.uri(), "Session expired");
                req.extensions_mut().insert(ExpiredSession);
            }
            SessionLookup::Missing => {}
        }
    }
    next.run(req).await
}

/// 员工中间件 - 要求员工登录
///
/// # 错误
///
/// 无员工会话返回 401 Unauthorized
pub async fn require_employee(req: Request, next: Next) -> Result<Response, AppError> {
    let is_employee = req
        .extensions()
        .get::<CurrentSession>()
        .is_some_and(|s| matches!(s.session, Session::Employee { .. }));
    if !is_employee {
        security_log!("WARN", "employee_required", uri = format!("{}", req.uri()));
        if req.extensions().get::<ExpiredSession>().is_some() {
            return Err(AppError::session_expired());
        }
        return Err(AppError::not_authenticated());
    }

    Ok(next.run(req).await)
}

/// 管理员中间件 - 要求管理员登录
///
/// # 错误
///
/// 非管理员返回 403 Forbidden
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let is_admin = req
        .extensions()
        .get::<CurrentSession>()
        .is_some_and(|s| s.session.is_admin());
    if !is_admin {
        security_log!("WARN", "admin_required", uri = format!("{}", req.uri()));
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
