//! 认证授权模块
//!
//! 会话管理、凭证校验和中间件：
//! - [`SessionStore`] - 内存会话存储
//! - [`AdminCredentials`] / [`verify_employee`] - 登录校验
//! - [`resolve_session`] - 会话解析中间件 (全局)
//! - [`require_employee`] / [`require_admin`] - 角色检查中间件

pub mod credentials;
pub mod extractor;
pub mod middleware;
pub mod session;

pub use credentials::{AdminCredentials, verify_employee};
pub use extractor::{AdminSession, EmployeeSession, MaybeSession};
pub use middleware::{CurrentSession, require_admin, require_employee, resolve_session};
pub use session::{SESSION_COOKIE, Session, SessionLookup, SessionStore};
