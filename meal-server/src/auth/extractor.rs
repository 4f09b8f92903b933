//! Session extractors
//!
//! Read the session placed in request extensions by
//! [`crate::auth::resolve_session`].

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::middleware::CurrentSession;
use crate::auth::session::Session;

/// Logged-in employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSession {
    pub emp_id: String,
    pub emp_name: String,
}

impl<S: Send + Sync> FromRequestParts<S> for EmployeeSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentSession>() {
            Some(CurrentSession {
                session: Session::Employee { emp_id, emp_name },
                ..
            }) => Ok(Self {
                emp_id: emp_id.clone(),
                emp_name: emp_name.clone(),
            }),
            _ => Err(AppError::not_authenticated()),
        }
    }
}

/// Logged-in administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub account: String,
}

impl<S: Send + Sync> FromRequestParts<S> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentSession>() {
            Some(CurrentSession {
                session: Session::Admin { account },
                ..
            }) => Ok(Self {
                account: account.clone(),
            }),
            _ => Err(AppError::admin_required()),
        }
    }
}

/// Whatever session the request carries, if any
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<CurrentSession>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<CurrentSession>().cloned()))
    }
}
