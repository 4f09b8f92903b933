//! Employee Repository

use shared::ErrorCode;
use shared::models::{Employee, EmployeeSave};

use super::Saved;
use crate::db::Database;
use crate::db::seed::{EMPLOYEE_ID_SEED, next_id};
use crate::utils::validation::{
    MAX_CODE_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, normalize_code, normalize_name,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct EmployeeRepository {
    db: Database,
}

impl EmployeeRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All employees in stored order
    pub fn find_all(&self) -> Vec<Employee> {
        self.db.employees.load()
    }

    /// Find employee by employee ID (trimmed, case-insensitive)
    pub fn find_by_emp_id(&self, emp_id: &str) -> Option<Employee> {
        let emp_id = normalize_code(emp_id);
        self.find_all().into_iter().find(|e| e.emp_id == emp_id)
    }

    /// Create (no id) or update (id) an employee
    ///
    /// The referenced department must exist.
    pub fn save(&self, data: EmployeeSave) -> AppResult<Saved<Employee>> {
        let emp_id = normalize_code(&data.emp_id);
        let name = normalize_name(&data.emp_name);
        let dept_code = normalize_code(&data.dept_code);
        let password = data.password;

        if emp_id.is_empty() || name.is_empty() || password.is_empty() || dept_code.is_empty() {
            return Err(AppError::validation(
                "Employee ID, name, password and department are required",
            ));
        }
        validate_required_text(&emp_id, "empId", MAX_CODE_LEN)?;
        validate_required_text(&name, "empName", MAX_NAME_LEN)?;
        validate_required_text(&password, "password", MAX_PASSWORD_LEN)?;

        if !self.db.departments.load().iter().any(|d| d.code == dept_code) {
            return Err(AppError::with_message(
                ErrorCode::DepartmentNotFound,
                format!("Department {dept_code} does not exist"),
            )
            .with_detail("deptCode", dept_code));
        }

        self.db.employees.update(|emps| {
            let duplicate = |own_id: Option<i64>| {
                emps.iter()
                    .any(|e| e.emp_id == emp_id && Some(e.id) != own_id)
            };

            match data.id {
                Some(id) => {
                    if !emps.iter().any(|e| e.id == id) {
                        return Err(AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id));
                    }
                    if duplicate(Some(id)) {
                        return Err(employee_id_exists(&emp_id));
                    }
                    let emp = emps
                        .iter_mut()
                        .find(|e| e.id == id)
                        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
                    emp.emp_id = emp_id.clone();
                    emp.name = name.clone();
                    emp.password = password.clone();
                    emp.dept_code = dept_code.clone();
                    Ok(Saved::updated(emp.clone()))
                }
                None => {
                    if duplicate(None) {
                        return Err(employee_id_exists(&emp_id));
                    }
                    let emp = Employee {
                        id: next_id(emps.iter().map(|e| e.id), EMPLOYEE_ID_SEED),
                        emp_id: emp_id.clone(),
                        name: name.clone(),
                        password: password.clone(),
                        dept_code: dept_code.clone(),
                    };
                    emps.push(emp.clone());
                    Ok(Saved::created(emp))
                }
            }
        })
    }

    /// Remove by id; returns whether a record was removed
    pub fn delete(&self, id: i64) -> AppResult<bool> {
        self.db.employees.update(|emps| {
            let before = emps.len();
            emps.retain(|e| e.id != id);
            Ok(emps.len() != before)
        })
    }
}

fn employee_id_exists(emp_id: &str) -> AppError {
    AppError::new(ErrorCode::EmployeeIdExists).with_detail("empId", emp_id)
}
