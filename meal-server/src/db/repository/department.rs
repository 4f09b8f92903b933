//! Department Repository

use shared::ErrorCode;
use shared::models::{Department, DepartmentSave};

use super::Saved;
use crate::db::Database;
use crate::db::seed::{DEPARTMENT_ID_SEED, next_id};
use crate::utils::validation::{
    MAX_CODE_LEN, MAX_NAME_LEN, normalize_code, normalize_name, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct DepartmentRepository {
    db: Database,
}

impl DepartmentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All departments in stored order
    pub fn find_all(&self) -> Vec<Department> {
        self.db.departments.load()
    }

    pub fn find_by_code(&self, code: &str) -> Option<Department> {
        let code = normalize_code(code);
        self.find_all().into_iter().find(|d| d.code == code)
    }

    /// Create (no id) or update (id) a department
    pub fn save(&self, data: DepartmentSave) -> AppResult<Saved<Department>> {
        let code = normalize_code(&data.dept_code);
        let name = normalize_name(&data.dept_name);
        if code.is_empty() || name.is_empty() {
            return Err(AppError::validation("Department code and name are required"));
        }
        validate_required_text(&code, "deptCode", MAX_CODE_LEN)?;
        validate_required_text(&name, "deptName", MAX_NAME_LEN)?;

        self.db.departments.update(|depts| {
            let duplicate = |own_id: Option<i64>| {
                depts
                    .iter()
                    .any(|d| d.code == code && Some(d.id) != own_id)
            };

            match data.id {
                Some(id) => {
                    if !depts.iter().any(|d| d.id == id) {
                        return Err(AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", id));
                    }
                    if duplicate(Some(id)) {
                        return Err(department_code_exists(&code));
                    }
                    let dept = depts
                        .iter_mut()
                        .find(|d| d.id == id)
                        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))?;
                    dept.code = code.clone();
                    dept.name = name.clone();
                    Ok(Saved::updated(dept.clone()))
                }
                None => {
                    if duplicate(None) {
                        return Err(department_code_exists(&code));
                    }
                    let dept = Department {
                        id: next_id(depts.iter().map(|d| d.id), DEPARTMENT_ID_SEED),
                        code: code.clone(),
                        name: name.clone(),
                    };
                    depts.push(dept.clone());
                    Ok(Saved::created(dept))
                }
            }
        })
    }

    /// Remove by id; returns whether a record was removed
    pub fn delete(&self, id: i64) -> AppResult<bool> {
        self.db.departments.update(|depts| {
            let before = depts.len();
            depts.retain(|d| d.id != id);
            Ok(depts.len() != before)
        })
    }
}

fn department_code_exists(code: &str) -> AppError {
    AppError::new(ErrorCode::DepartmentCodeExists).with_detail("deptCode", code)
}
