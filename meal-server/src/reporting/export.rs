//! CSV export of an order range

use shared::models::OrderRecord;

use super::{DateRange, OrderFilter, ReportService};

const HEADER: [&str; 9] = [
    "date",
    "empId",
    "empName",
    "deptCode",
    "mealType",
    "dietType",
    "ricePortion",
    "orderTime",
    "adminModified",
];

/// Attachment file name for a range
pub fn export_file_name(range: &DateRange) -> String {
    format!("orders_{}_{}.csv", range.from, range.to)
}

impl ReportService {
    /// Orders in the range as CSV text (header + one line per order)
    pub fn export_orders_csv(&self, range: &DateRange, filter: &OrderFilter) -> String {
        let employees = self.employee_index();
        let orders = self.orders_by_date_range(range, filter);

        let mut lines = Vec::with_capacity(orders.len() + 1);
        lines.push(HEADER.join(","));
        for order in &orders {
            let (name, dept) = employees
                .get(&order.emp_id)
                .map(|e| (e.name.as_str(), e.dept_code.as_str()))
                .unwrap_or(("", ""));
            lines.push(csv_row(order, name, dept));
        }

        let mut out = lines.join("\r\n");
        out.push_str("\r\n");
        out
    }
}

fn csv_row(order: &OrderRecord, emp_name: &str, dept_code: &str) -> String {
    let order_time = order
        .order_time
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default();
    [
        order.date.to_string(),
        order.emp_id.clone(),
        emp_name.to_string(),
        dept_code.to_string(),
        order.meal_type.to_string(),
        order.diet_type.to_string(),
        order.rice_portion.to_string(),
        order_time,
        order.admin_modified.to_string(),
    ]
    .iter()
    .map(|v| csv_escape(v))
    .collect::<Vec<_>>()
    .join(",")
}

/// Values a spreadsheet would evaluate as a formula
fn should_neutralize_csv(value: &str) -> bool {
    let trimmed = value.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('\'') {
        return false;
    }
    matches!(trimmed.chars().next(), Some('=' | '+' | '-' | '@'))
}

fn csv_escape(value: &str) -> String {
    let safe = if should_neutralize_csv(value) {
        format!("'{value}")
    } else {
        value.to_string()
    };
    if safe.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}
