//! Database Module
//!
//! Four independent JSON documents under the data directory, each behind its
//! own [`JsonStore`]. Missing documents are seeded on open.

pub mod order_map;
pub mod repository;
pub mod seed;
pub mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::models::{Department, Employee, OrderWindow};

pub use order_map::OrderMap;
pub use store::{JsonStore, StoreError, StoreResult};

pub const DEPARTMENTS_FILE: &str = "departments.json";
pub const EMPLOYEES_FILE: &str = "employees.json";
pub const WINDOWS_FILE: &str = "windows.json";
pub const ORDERS_FILE: &str = "orders.json";

/// Database service — owns the collection stores
#[derive(Debug, Clone)]
pub struct Database {
    data_dir: PathBuf,
    pub departments: Arc<JsonStore<Vec<Department>>>,
    pub employees: Arc<JsonStore<Vec<Employee>>>,
    pub windows: Arc<JsonStore<Vec<OrderWindow>>>,
    pub orders: Arc<JsonStore<OrderMap>>,
}

impl Database {
    /// Open the data directory, creating it and seeding missing documents
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
            path: data_dir.display().to_string(),
            source,
        })?;

        let db = Self {
            departments: Arc::new(JsonStore::new(data_dir.join(DEPARTMENTS_FILE))),
            employees: Arc::new(JsonStore::new(data_dir.join(EMPLOYEES_FILE))),
            windows: Arc::new(JsonStore::new(data_dir.join(WINDOWS_FILE))),
            orders: Arc::new(JsonStore::new(data_dir.join(ORDERS_FILE))),
            data_dir,
        };
        db.seed()?;

        let orders = db.orders.load();
        let unreadable = orders.unreadable_keys().count();
        if unreadable > 0 {
            tracing::warn!(unreadable, "Order entries that cannot be read are kept as-is");
        }
        tracing::info!(orders = orders.len(), "Orders loaded");
        Ok(db)
    }

    fn seed(&self) -> StoreResult<()> {
        let mut seeded = Vec::new();
        if self.departments.seed_with(seed::departments)? {
            seeded.push(DEPARTMENTS_FILE);
        }
        if self.employees.seed_with(seed::employees)? {
            seeded.push(EMPLOYEES_FILE);
        }
        if self.windows.seed_with(seed::windows)? {
            seeded.push(WINDOWS_FILE);
        }
        if self.orders.seed_with(OrderMap::new)? {
            seeded.push(ORDERS_FILE);
        }
        if !seeded.is_empty() {
            tracing::info!(dir = %self.data_dir.display(), files = ?seeded, "Seeded data files");
        }
        Ok(())
    }
}
