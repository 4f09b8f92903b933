//! Order Window Repository
//!
//! An order window is an employee who orders on behalf of one or more
//! departments. At most one window per employee.

use shared::ErrorCode;
use shared::models::{OrderWindow, OrderWindowSave};

use super::Saved;
use crate::db::Database;
use crate::db::seed::{WINDOW_ID_SEED, next_id};
use crate::utils::validation::{normalize_code, normalize_code_list};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct OrderWindowRepository {
    db: Database,
}

impl OrderWindowRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn find_all(&self) -> Vec<OrderWindow> {
        self.db.windows.load()
    }

    pub fn find_by_emp_id(&self, emp_id: &str) -> Option<OrderWindow> {
        let emp_id = normalize_code(emp_id);
        self.find_all().into_iter().find(|w| w.emp_id == emp_id)
    }

    /// Create (no id) or update (id) a window
    ///
    /// The employee must exist and at least one department code is required.
    /// Codes are not checked against the department list.
    pub fn save(&self, data: OrderWindowSave) -> AppResult<Saved<OrderWindow>> {
        let emp_id = normalize_code(&data.emp_id);
        let codes = normalize_code_list(&data.responsible_dept_codes);

        if emp_id.is_empty() {
            return Err(AppError::validation("An order window employee is required"));
        }
        if codes.is_empty() {
            return Err(AppError::validation("Select at least one responsible department"));
        }
        if !self.db.employees.load().iter().any(|e| e.emp_id == emp_id) {
            return Err(AppError::with_message(
                ErrorCode::EmployeeNotFound,
                format!("Employee {emp_id} does not exist"),
            )
            .with_detail("empId", emp_id));
        }

        self.db.windows.update(|windows| {
            let taken = |own_id: Option<i64>| {
                windows
                    .iter()
                    .any(|w| w.emp_id == emp_id && Some(w.id) != own_id)
            };

            match data.id {
                Some(id) => {
                    if !windows.iter().any(|w| w.id == id) {
                        return Err(AppError::new(ErrorCode::WindowNotFound).with_detail("id", id));
                    }
                    if taken(Some(id)) {
                        return Err(window_exists(&emp_id));
                    }
                    let window = windows
                        .iter_mut()
                        .find(|w| w.id == id)
                        .ok_or_else(|| AppError::new(ErrorCode::WindowNotFound))?;
                    window.emp_id = emp_id.clone();
                    window.responsible_dept_codes = codes.clone();
                    Ok(Saved::updated(window.clone()))
                }
                None => {
                    if taken(None) {
                        return Err(window_exists(&emp_id));
                    }
                    let window = OrderWindow {
                        id: next_id(windows.iter().map(|w| w.id), WINDOW_ID_SEED),
                        emp_id: emp_id.clone(),
                        responsible_dept_codes: codes.clone(),
                    };
                    windows.push(window.clone());
                    Ok(Saved::created(window))
                }
            }
        })
    }

    /// Remove by id; returns whether a record was removed
    pub fn delete(&self, id: i64) -> AppResult<bool> {
        self.db.windows.update(|windows| {
            let before = windows.len();
            windows.retain(|w| w.id != id);
            Ok(windows.len() != before)
        })
    }
}

fn window_exists(emp_id: &str) -> AppError {
    AppError::new(ErrorCode::WindowAlreadyExists).with_detail("empId", emp_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::seeded_db;

    fn save(id: Option<i64>, emp_id: &str, codes: &[&str]) -> OrderWindowSave {
        OrderWindowSave {
            id,
            emp_id: emp_id.into(),
            responsible_dept_codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_create_window_dedupes_codes() {
        let (_dir, db) = seeded_db();
        let repo = OrderWindowRepository::new(db);

        let saved = repo.save(save(None, "93800", &["b20", "B20 ", ""])).unwrap();
        assert!(saved.created);
        assert_eq!(saved.record.id, 2);
        assert_eq!(saved.record.responsible_dept_codes, vec!["B20"]);
    }

    #[test]
    fn test_second_window_for_same_employee_conflicts() {
        let (_dir, db) = seeded_db();
        let repo = OrderWindowRepository::new(db);

        let err = repo.save(save(None, "28109", &["B20"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::WindowAlreadyExists);
    }

    #[test]
    fn test_update_cannot_take_other_employees_window() {
        let (_dir, db) = seeded_db();
        let repo = OrderWindowRepository::new(db);
        repo.save(save(None, "93800", &["A10"])).unwrap();

        let err = repo.save(save(Some(2), "28109", &["A10"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::WindowAlreadyExists);

        let saved = repo.save(save(Some(1), "28109", &["B20"])).unwrap();
        assert_eq!(saved.record.responsible_dept_codes, vec!["B20"]);
    }

    #[test]
    fn test_requires_codes_and_known_employee() {
        let (_dir, db) = seeded_db();
        let repo = OrderWindowRepository::new(db);

        let err = repo.save(save(None, "93800", &[" "])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = repo.save(save(None, "NOBODY", &["A10"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
    }

    #[test]
    fn test_update_missing_window() {
        let (_dir, db) = seeded_db();
        let repo = OrderWindowRepository::new(db);

        let err = repo.save(save(Some(42), "93800", &["A10"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::WindowNotFound);
    }

    #[test]
    fn test_delete() {
        let (_dir, db) = seeded_db();
        let repo = OrderWindowRepository::new(db);

        assert!(repo.delete(1).unwrap());
        assert!(repo.find_all().is_empty());
        assert!(!repo.delete(1).unwrap());
    }
}
