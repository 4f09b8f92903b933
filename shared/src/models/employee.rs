//! Employee Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::string_or_empty;

/// Employee master record, as stored in `employees.json`
///
/// Passwords are stored in plaintext; this is a trusted-LAN tool and the
/// stored format is shared with the existing data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "OID")]
    pub id: i64,
    /// Natural key, unique, upper-case
    #[serde(rename = "EmpID", default, deserialize_with = "string_or_empty")]
    pub emp_id: String,
    #[serde(rename = "EmpName", default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(rename = "Password", default, deserialize_with = "string_or_empty")]
    pub password: String,
    /// References [`super::Department::code`]
    #[serde(rename = "DeptCode", default, deserialize_with = "string_or_empty")]
    pub dept_code: String,
}

impl Employee {
    /// Plaintext password comparison
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Employee response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub emp_id: String,
    pub emp_name: String,
    pub password_length: usize,
    pub dept_code: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(emp: Employee) -> Self {
        Self {
            id: emp.id,
            password_length: emp.password.chars().count(),
            emp_id: emp.emp_id,
            emp_name: emp.name,
            dept_code: emp.dept_code,
        }
    }
}

/// Save employee payload: `id` present = update, absent = create
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSave {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub emp_id: String,
    #[serde(default)]
    pub emp_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub dept_code: String,
}

/// Public identity of a logged-in employee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub emp_id: String,
    pub emp_name: String,
    pub dept_code: String,
}

impl From<&Employee> for EmployeeProfile {
    fn from(emp: &Employee) -> Self {
        Self {
            emp_id: emp.emp_id.clone(),
            emp_name: emp.name.clone(),
            dept_code: emp.dept_code.clone(),
        }
    }
}
