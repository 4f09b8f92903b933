//! First-run data
//!
//! Written only when the corresponding file does not exist yet.

use shared::models::{Department, Employee, OrderWindow};

/// First OID handed out when a collection is empty
pub const DEPARTMENT_ID_SEED: i64 = 1;
pub const EMPLOYEE_ID_SEED: i64 = 101;
pub const WINDOW_ID_SEED: i64 = 1;

const DEFAULT_PASSWORD: &str = "1234";

pub fn departments() -> Vec<Department> {
    [(1, "A10", "生產部"), (2, "B20", "倉儲部"), (3, "C30", "行政部")]
        .into_iter()
        .map(|(id, code, name)| Department {
            id,
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn employees() -> Vec<Employee> {
    [
        (101, "93800", "林淑鈺", "A10"),
        (102, "28109", "詹金璋", "B20"),
        (103, "2400305", "王瀚章", "C30"),
    ]
    .into_iter()
    .map(|(id, emp_id, name, dept_code)| Employee {
        id,
        emp_id: emp_id.to_string(),
        name: name.to_string(),
        password: DEFAULT_PASSWORD.to_string(),
        dept_code: dept_code.to_string(),
    })
    .collect()
}

pub fn windows() -> Vec<OrderWindow> {
    vec![OrderWindow {
        id: 1,
        emp_id: "28109".to_string(),
        responsible_dept_codes: vec!["A10".to_string(), "C30".to_string()],
    }]
}

/// Next OID: max existing + 1, or `seed` for an empty collection
pub fn next_id(ids: impl Iterator<Item = i64>, seed: i64) -> i64 {
    ids.max().map(|max| max + 1).unwrap_or(seed)
}
