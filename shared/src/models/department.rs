//! Department Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::string_or_empty;

/// Department master record, as stored in `departments.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "OID")]
    pub id: i64,
    /// Natural key, unique, upper-case (e.g. `A10`)
    #[serde(rename = "DeptCode", default, deserialize_with = "string_or_empty")]
    pub code: String,
    #[serde(rename = "DeptName", default, deserialize_with = "string_or_empty")]
    pub name: String,
}

/// Department view returned by the admin API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: i64,
    pub dept_code: String,
    pub dept_name: String,
}

impl From<Department> for DepartmentResponse {
    fn from(dept: Department) -> Self {
        Self {
            id: dept.id,
            dept_code: dept.code,
            dept_name: dept.name,
        }
    }
}

/// Save department payload: `id` present = update, absent = create
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSave {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub dept_code: String,
    #[serde(default)]
    pub dept_name: String,
}
