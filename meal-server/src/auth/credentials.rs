//! Login credential checks
//!
//! Passwords are compared in plaintext: the employee file stores them that
//! way and there is a single administrator account.

use shared::models::Employee;

use crate::db::repository::EmployeeRepository;
use crate::utils::validation::normalize_code;

pub const DEFAULT_ADMIN_ACCOUNT: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "1234";

/// The administrator account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub account: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, account: &str, password: &str) -> bool {
        self.account == account && self.password == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_ACCOUNT, DEFAULT_ADMIN_PASSWORD)
    }
}

/// Employee login: ID is trimmed and upper-cased before lookup
pub fn verify_employee(repo: &EmployeeRepository, emp_id: &str, password: &str) -> Option<Employee> {
    let emp_id = normalize_code(emp_id);
    if emp_id.is_empty() {
        return None;
    }
    repo.find_by_emp_id(&emp_id)
        .filter(|emp| emp.verify_password(password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_admin_verify() {
        let creds = AdminCredentials::default();
        assert!(creds.verify("admin", "1234"));
        assert!(!creds.verify("admin", "12345"));
        assert!(!creds.verify("Admin", "1234"));
    }

    #[test]
    fn test_verify_employee_normalizes_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = EmployeeRepository::new(Database::open(dir.path()).unwrap());

        assert_eq!(verify_employee(&repo, " 93800 ", "1234").unwrap().name, "林淑鈺");
        assert!(verify_employee(&repo, "93800", "wrong").is_none());
        assert!(verify_employee(&repo, "", "1234").is_none());
    }
}
