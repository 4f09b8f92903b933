//! Auth request/response types shared between server and API clients

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Employee login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginRequest {
    #[serde(default)]
    pub emp_id: String,
    #[serde(default)]
    pub password: String,
}

/// Admin login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub password: String,
}

/// Result of `check-session`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum SessionInfo {
    Admin {
        account: String,
    },
    Employee {
        #[serde(rename = "empId")]
        emp_id: String,
        #[serde(rename = "empName")]
        emp_name: String,
    },
    Anonymous,
}

impl SessionInfo {
    pub fn is_logged_in(&self) -> bool {
        !matches!(self, SessionInfo::Anonymous)
    }
}
