//! Order Window Model
//!
//! An order window is an employee who plans meals on behalf of one or more
//! departments. Used for reporting scope only.

use serde::{Deserialize, Serialize};

use super::serde_helpers::string_or_empty;

/// Order window record, as stored in `windows.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWindow {
    #[serde(rename = "OID")]
    pub id: i64,
    /// References [`super::Employee::emp_id`], unique across windows
    #[serde(rename = "EmpID", default, deserialize_with = "string_or_empty")]
    pub emp_id: String,
    /// Department codes, de-duplicated, in first-seen order
    #[serde(rename = "ResponsibleDeptCodes", default)]
    pub responsible_dept_codes: Vec<String>,
}

/// Order window view returned by the admin API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWindowResponse {
    pub id: i64,
    pub emp_id: String,
    pub responsible_dept_codes: Vec<String>,
}

impl From<OrderWindow> for OrderWindowResponse {
    fn from(win: OrderWindow) -> Self {
        Self {
            id: win.id,
            emp_id: win.emp_id,
            responsible_dept_codes: win.responsible_dept_codes,
        }
    }
}

/// Save order window payload: `id` present = update, absent = create
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWindowSave {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub emp_id: String,
    #[serde(default)]
    pub responsible_dept_codes: Vec<String>,
}
