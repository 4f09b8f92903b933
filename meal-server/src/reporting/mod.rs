//! Order queries and statistics
//!
//! All reports start from [`ReportService::orders_by_date_range`]: ordered
//! entries only, inclusive date range, optional employee / department filter,
//! sorted by date then order key.

pub mod export;

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use shared::models::{
    DietType, Employee, EmployeeOrderStats, MealQuantityStat, MealType, OrderRecord, ReportQuery,
    RicePortion,
};

use crate::db::Database;
use crate::db::repository::{EmployeeRepository, OrderRepository};
use crate::utils::time::parse_date;
use crate::utils::validation::normalize_code;
use crate::utils::{AppError, AppResult};

/// Optional narrowing of a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub emp_id: Option<String>,
    pub dept_code: Option<String>,
}

impl OrderFilter {
    /// Blank values count as "no filter"; values are normalized like stored codes
    pub fn new(emp_id: Option<&str>, dept_code: Option<&str>) -> Self {
        let clean = |v: Option<&str>| v.map(normalize_code).filter(|v| !v.is_empty());
        Self {
            emp_id: clean(emp_id),
            dept_code: clean(dept_code),
        }
    }

    pub fn employee(emp_id: &str) -> Self {
        Self::new(Some(emp_id), None)
    }

    fn matches_employee(&self, emp: &Employee) -> bool {
        self.emp_id.as_ref().is_none_or(|id| *id == emp.emp_id)
            && self.dept_code.as_ref().is_none_or(|code| *code == emp.dept_code)
    }
}

/// A validated report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Parse both ends; either one unparsable fails the request
    pub fn parse(from: &str, to: &str) -> AppResult<Self> {
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(AppError::validation("dateFrom and dateTo are required"));
        }
        Ok(Self {
            from: parse_date(from)?,
            to: parse_date(to)?,
        })
    }

    pub fn from_query(query: &ReportQuery) -> AppResult<(Self, OrderFilter)> {
        let range = Self::parse(&query.date_from, &query.date_to)?;
        let filter = OrderFilter::new(query.emp_id.as_deref(), query.dept_code.as_deref());
        Ok((range, filter))
    }
}

#[derive(Clone)]
pub struct ReportService {
    orders: OrderRepository,
    employees: EmployeeRepository,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            employees: EmployeeRepository::new(db),
        }
    }

    /// Ordered entries within the range, sorted by date then key
    ///
    /// With a department filter, orders whose employee is unknown are dropped.
    pub fn orders_by_date_range(&self, range: &DateRange, filter: &OrderFilter) -> Vec<OrderRecord> {
        let dept_of: HashMap<String, String> = match filter.dept_code {
            Some(_) => self
                .employees
                .find_all()
                .into_iter()
                .map(|e| (e.emp_id, e.dept_code))
                .collect(),
            None => HashMap::new(),
        };

        let mut entries: Vec<_> = self
            .orders
            .find_by_date_range(range.from, range.to)
            .into_iter()
            .filter(|(_, order)| order.is_ordered)
            .filter(|(key, _)| filter.emp_id.as_ref().is_none_or(|id| *id == key.emp_id))
            .filter(|(key, _)| match &filter.dept_code {
                Some(code) => dept_of.get(&key.emp_id) == Some(code),
                None => true,
            })
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        entries
            .into_iter()
            .map(|(key, order)| {
                let mut record = OrderRecord::from_order(key.date, &order);
                record.emp_id = key.emp_id;
                record
            })
            .collect()
    }

    /// Dish counts per (date, meal, diet, portion), sorted by that tuple
    pub fn meal_quantity_stats(&self, range: &DateRange, filter: &OrderFilter) -> Vec<MealQuantityStat> {
        let mut counts: BTreeMap<(NaiveDate, MealType, DietType, RicePortion), usize> = BTreeMap::new();
        for order in self.orders_by_date_range(range, filter) {
            *counts
                .entry((order.date, order.meal_type, order.diet_type, order.rice_portion))
                .or_default() += 1;
        }

        counts
            .into_iter()
            .map(|((date, meal_type, diet_type, rice_portion), count)| MealQuantityStat {
                date,
                meal_type,
                diet_type,
                rice_portion,
                count,
            })
            .collect()
    }

    /// Order counts per employee, in master employee order
    ///
    /// Every employee matching the filter gets a row, even with zero orders.
    /// Orders of employees not in the master list are ignored.
    pub fn employee_order_stats(&self, range: &DateRange, filter: &OrderFilter) -> Vec<EmployeeOrderStats> {
        let mut stats: Vec<EmployeeOrderStats> = self
            .employees
            .find_all()
            .iter()
            .filter(|e| filter.matches_employee(e))
            .map(|e| EmployeeOrderStats::zero(e.emp_id.clone(), e.name.clone(), e.dept_code.clone()))
            .collect();
        let index: HashMap<String, usize> = stats
            .iter()
            .enumerate()
            .map(|(i, s)| (s.emp_id.clone(), i))
            .collect();

        for order in self.orders_by_date_range(range, filter) {
            if let Some(&i) = index.get(&order.emp_id) {
                stats[i].tally(order.meal_type);
            }
        }
        stats
    }

    /// Employee master rows keyed by employee ID (used by export)
    pub(crate) fn employee_index(&self) -> HashMap<String, Employee> {
        self.employees
            .find_all()
            .into_iter()
            .map(|e| (e.emp_id.clone(), e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use shared::models::{MealOrder, OrderKey};

    use super::*;
    use crate::db::repository::OrderRepository;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).unwrap();
        let repo = OrderRepository::new(db.clone());
        let put = |date: &str, emp: &str, meal: MealType, diet: DietType, ordered: bool| {
            let key = OrderKey::new(d(date), emp, meal);
            repo.upsert(
                &key,
                MealOrder {
                    emp_id: emp.into(),
                    meal_type: meal,
                    diet_type: diet,
                    rice_portion: RicePortion::Full,
                    is_ordered: ordered,
                    order_time: NaiveTime::from_hms_opt(8, 0, 0),
                    admin_modified: false,
                },
            )
            .unwrap();
        };
        put("2024-01-11", "93800", MealType::Lunch, DietType::Meat, true);
        put("2024-01-10", "93800", MealType::Dinner, DietType::Veg, true);
        put("2024-01-10", "28109", MealType::Lunch, DietType::Meat, true);
        put("2024-01-10", "93800", MealType::Lunch, DietType::Meat, true);
        put("2024-01-10", "GHOST", MealType::Lunch, DietType::Meat, true);
        put("2024-01-10", "2400305", MealType::Lunch, DietType::Meat, false);
        (dir, db)
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::parse(from, to).unwrap()
    }

    #[test]
    fn test_orders_by_date_range_sorted() {
        let (_dir, db) = setup();
        let svc = ReportService::new(db);

        let rows = svc.orders_by_date_range(&range("2024-01-10", "2024-01-11"), &OrderFilter::default());
        let keys: Vec<_> = rows
            .iter()
            .map(|r| format!("{}_{}_{}", r.date, r.emp_id, r.meal_type))
            .collect();
        assert_eq!(
            keys,
            vec![
                "2024-01-10_28109_LUNCH",
                "2024-01-10_93800_LUNCH",
                "2024-01-10_93800_DINNER",
                "2024-01-10_GHOST_LUNCH",
                "2024-01-11_93800_LUNCH",
            ]
        );
    }

    #[test]
    fn test_filter_by_employee_and_department() {
        let (_dir, db) = setup();
        let svc = ReportService::new(db);
        let r = range("2024-01-01", "2024-01-31");

        assert_eq!(svc.orders_by_date_range(&r, &OrderFilter::employee("93800")).len(), 3);
        // GHOST has no employee record, so a department filter drops it
        let by_dept = svc.orders_by_date_range(&r, &OrderFilter::new(None, Some("a10")));
        assert_eq!(by_dept.len(), 3);
        assert!(by_dept.iter().all(|o| o.emp_id == "93800"));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let (_dir, db) = setup();
        let svc = ReportService::new(db);
        assert!(svc
            .orders_by_date_range(&range("2024-01-11", "2024-01-10"), &OrderFilter::default())
            .is_empty());
    }

    #[test]
    fn test_unparsable_date_fails() {
        let err = DateRange::parse("2024-01-01", "2024/01/31").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::InvalidFormat);
        assert!(err.message.contains("2024/01/31"));

        let err = DateRange::parse("", "2024-01-31").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_meal_quantity_stats() {
        let (_dir, db) = setup();
        let svc = ReportService::new(db);

        let stats = svc.meal_quantity_stats(&range("2024-01-10", "2024-01-10"), &OrderFilter::default());
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].meal_type, MealType::Lunch);
        assert_eq!(stats[0].diet_type, DietType::Meat);
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[1].meal_type, MealType::Dinner);
        assert_eq!(stats[1].count, 1);
    }

    #[test]
    fn test_employee_order_stats() {
        let (_dir, db) = setup();
        let svc = ReportService::new(db);

        let stats = svc.employee_order_stats(&range("2024-01-01", "2024-01-31"), &OrderFilter::default());
        let ids: Vec<_> = stats.iter().map(|s| s.emp_id.as_str()).collect();
        assert_eq!(ids, vec!["93800", "28109", "2400305"]);
        assert_eq!(stats[0].lunch_count, 2);
        assert_eq!(stats[0].dinner_count, 1);
        assert_eq!(stats[0].total_count, 3);
        assert_eq!(stats[2].total_count, 0);
    }

    #[test]
    fn test_employee_order_stats_empty_range_all_zero() {
        let (_dir, db) = setup();
        let svc = ReportService::new(db);

        let stats = svc.employee_order_stats(&range("2023-01-01", "2023-01-31"), &OrderFilter::default());
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|s| s.total_count == 0));
    }
}
