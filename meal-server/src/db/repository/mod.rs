//! Repository Module
//!
//! CRUD over the JSON collections. Every mutation is one load-modify-save
//! through [`crate::db::JsonStore::update`].

pub mod department;
pub mod employee;
pub mod order;
pub mod order_window;

pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use order::OrderRepository;
pub use order_window::OrderWindowRepository;

/// Result of a save: the stored record and whether it was newly created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub record: T,
    pub created: bool,
}

impl<T> Saved<T> {
    pub fn created(record: T) -> Self {
        Self {
            record,
            created: true,
        }
    }

    pub fn updated(record: T) -> Self {
        Self {
            record,
            created: false,
        }
    }

    /// "{resource} created" / "{resource} updated"
    pub fn message(&self, resource: &str) -> String {
        if self.created {
            format!("{resource} created")
        } else {
            format!("{resource} updated")
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::Database;

    /// Seeded database in a fresh temp dir; keep the guard alive
    pub fn seeded_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).unwrap();
        (dir, db)
    }
}
