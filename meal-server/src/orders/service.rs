//! Order Service
//!
//! Create, cancel and edit meal orders. Employees are bound by the meal
//! cutoff; administrators bypass it. Every create stamps the wall-clock time
//! and whether an administrator issued it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Timelike};
use shared::ErrorCode;
use shared::models::{
    BatchResult, DayOrders, DietType, MealOrder, MealType, OrderKey, OrderRecord, OrderSlot,
    RicePortion, TodayOrders, WeekType, WeeklyOrderItem,
};

use super::policy::is_cutoff_passed;
use crate::db::Database;
use crate::db::repository::{EmployeeRepository, OrderRepository};
use crate::reporting::{DateRange, OrderFilter, ReportService};
use crate::utils::time::{Clock, dates_between, week_range};
use crate::utils::validation::normalize_code;
use crate::utils::{AppError, AppResult};

/// Administrator edit of an existing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderChange {
    Cancel,
    Set {
        diet_type: DietType,
        rice_portion: RicePortion,
    },
}

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    employees: EmployeeRepository,
    reports: ReportService,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            employees: EmployeeRepository::new(db.clone()),
            reports: ReportService::new(db),
            clock,
        }
    }

    /// Business date "today"
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether ordering for `meal_type` on `date` (default today) has closed
    pub fn check_cutoff(&self, meal_type: MealType, date: Option<NaiveDate>) -> bool {
        let now = self.clock.now();
        is_cutoff_passed(meal_type, date.unwrap_or(now.date()), now)
    }

    /// Place (or overwrite) an order
    ///
    /// The cutoff is checked before the employee lookup, so a late order for
    /// an unknown empId reports `CutoffPassed` rather than `EmployeeNotFound`.
    pub fn create_order(
        &self,
        emp_id: &str,
        meal_type: MealType,
        diet_type: DietType,
        rice_portion: RicePortion,
        date: Option<NaiveDate>,
        is_admin: bool,
    ) -> AppResult<OrderRecord> {
        let now = self.clock.now();
        let date = date.unwrap_or(now.date());

        if !is_admin && is_cutoff_passed(meal_type, date, now) {
            return Err(AppError::cutoff_passed(format!(
                "{} ordering has closed",
                meal_type.label()
            )));
        }

        let emp_id = normalize_code(emp_id);
        if self.employees.find_by_emp_id(&emp_id).is_none() {
            return Err(AppError::new(ErrorCode::EmployeeNotFound).with_detail("empId", emp_id));
        }

        let key = OrderKey::new(date, emp_id.clone(), meal_type);
        let order = MealOrder {
            emp_id,
            meal_type,
            diet_type,
            rice_portion,
            is_ordered: true,
            order_time: Some(now.time().with_nanosecond(0).unwrap_or(now.time())),
            admin_modified: is_admin,
        };
        self.orders.upsert(&key, order.clone())?;

        tracing::info!(key = %key, diet = %diet_type, rice = %rice_portion, admin = is_admin, "Order placed");
        Ok(OrderRecord::from_order(date, &order))
    }

    /// Remove an order; not-found when there is none
    pub fn cancel_order(
        &self,
        emp_id: &str,
        meal_type: MealType,
        date: Option<NaiveDate>,
        is_admin: bool,
    ) -> AppResult<()> {
        let now = self.clock.now();
        let date = date.unwrap_or(now.date());

        if !is_admin && is_cutoff_passed(meal_type, date, now) {
            return Err(AppError::cutoff_passed(format!(
                "{} ordering has closed, the order can no longer be cancelled",
                meal_type.label()
            )));
        }

        let key = OrderKey::new(date, normalize_code(emp_id), meal_type);
        match self.orders.remove(&key)? {
            Some(_) => {
                tracing::info!(key = %key, admin = is_admin, "Order cancelled");
                Ok(())
            }
            None => Err(AppError::new(ErrorCode::OrderNotFound).with_detail("key", key.to_string())),
        }
    }

    /// Administrator edit: cancel, or replace diet and portion (no cutoff)
    ///
    /// The order time is left as it was.
    pub fn update_order(
        &self,
        emp_id: &str,
        meal_type: MealType,
        date: NaiveDate,
        change: OrderChange,
    ) -> AppResult<Option<OrderRecord>> {
        let key = OrderKey::new(date, normalize_code(emp_id), meal_type);
        let not_found = || AppError::new(ErrorCode::OrderNotFound).with_detail("key", key.to_string());

        match change {
            OrderChange::Cancel => {
                self.orders.remove(&key)?.ok_or_else(not_found)?;
                tracing::info!(key = %key, "Order cancelled by administrator");
                Ok(None)
            }
            OrderChange::Set {
                diet_type,
                rice_portion,
            } => {
                let order = self
                    .orders
                    .modify(&key, |order| {
                        order.diet_type = diet_type;
                        order.rice_portion = rice_portion;
                        order.admin_modified = true;
                    })?
                    .ok_or_else(not_found)?;
                tracing::info!(key = %key, diet = %diet_type, rice = %rice_portion, "Order updated by administrator");
                Ok(Some(OrderRecord::from_order(date, &order)))
            }
        }
    }

    /// Today's lunch and dinner plus whether each is still open
    pub fn today_orders(&self, emp_id: &str) -> TodayOrders {
        let now = self.clock.now();
        let today = now.date();
        let emp_id = normalize_code(emp_id);
        let slot = |meal_type| {
            self.orders
                .find(&OrderKey::new(today, emp_id.clone(), meal_type))
                .filter(|o| o.is_ordered)
                .map(|o| OrderSlot::from(&o))
        };

        TodayOrders {
            date: today,
            lunch: slot(MealType::Lunch),
            dinner: slot(MealType::Dinner),
            lunch_cutoff: is_cutoff_passed(MealType::Lunch, today, now),
            dinner_cutoff: is_cutoff_passed(MealType::Dinner, today, now),
        }
    }

    /// One employee's orders for the selected span, one entry per day
    pub fn weekly_orders(&self, emp_id: &str, week_type: WeekType) -> BTreeMap<NaiveDate, DayOrders> {
        let (from, to) = week_range(self.today(), week_type);
        let mut days: BTreeMap<NaiveDate, DayOrders> = dates_between(from, to)
            .into_iter()
            .map(|d| (d, DayOrders::default()))
            .collect();

        let range = DateRange { from, to };
        for record in self.reports.orders_by_date_range(&range, &OrderFilter::employee(emp_id)) {
            let (date, meal_type) = (record.date, record.meal_type);
            *days.entry(date).or_default().slot_mut(meal_type) = Some(record);
        }
        days
    }

    /// Apply a batch of weekly grid cells for one employee
    ///
    /// Cells with both diet type and portion are created, others cancelled.
    /// A failing cell is reported and the batch continues.
    pub fn save_weekly_orders(&self, emp_id: &str, items: &[WeeklyOrderItem]) -> BatchResult {
        let mut result = BatchResult::default();

        for item in items {
            let outcome = match (item.diet_type, item.rice_portion) {
                (Some(diet_type), Some(rice_portion)) => self
                    .create_order(emp_id, item.meal_type, diet_type, rice_portion, Some(item.date), false)
                    .map(|_| ()),
                _ => self.cancel_order(emp_id, item.meal_type, Some(item.date), false),
            };

            result.processed += 1;
            match outcome {
                Ok(()) => result.success_count += 1,
                Err(e) => {
                    result.error_count += 1;
                    result
                        .errors
                        .push(format!("{} {}: {}", item.date, item.meal_type, e.message));
                }
            }
        }

        tracing::info!(
            emp_id = %emp_id,
            processed = result.processed,
            failed = result.error_count,
            "Weekly orders saved"
        );
        result
    }

    /// One employee's order history
    pub fn history(&self, emp_id: &str, range: &DateRange) -> Vec<OrderRecord> {
        self.reports
            .orders_by_date_range(range, &OrderFilter::employee(emp_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::utils::time::FixedClock;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup(now: &str) -> (tempfile::TempDir, OrderService, Arc<FixedClock>) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).unwrap();
        let clock = Arc::new(FixedClock::at(now).unwrap());
        let svc = OrderService::new(db, clock.clone());
        (dir, svc, clock)
    }

    fn lunch(svc: &OrderService, emp: &str, date: Option<NaiveDate>, admin: bool) -> AppResult<OrderRecord> {
        svc.create_order(emp, MealType::Lunch, DietType::Meat, RicePortion::Full, date, admin)
    }

    #[test]
    fn test_create_before_cutoff_appears_in_range() {
        let (_dir, svc, _) = setup("2024-01-10 08:00:00");

        let record = lunch(&svc, "93800", Some(d("2024-01-10")), false).unwrap();
        assert_eq!(record.order_time, NaiveTime::from_hms_opt(8, 0, 0));
        assert!(!record.admin_modified);

        let range = DateRange::parse("2024-01-10", "2024-01-10").unwrap();
        let rows = svc.history("93800", &range);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meal_type, MealType::Lunch);
        assert_eq!(rows[0].diet_type, DietType::Meat);
        assert_eq!(rows[0].rice_portion, RicePortion::Full);
        assert!(rows[0].is_ordered);
    }

    #[test]
    fn test_create_after_cutoff_rejected_unless_admin() {
        let (_dir, svc, _) = setup("2024-01-10 08:30:01");

        let err = lunch(&svc, "93800", None, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::CutoffPassed);
        assert_eq!(err.message, "Lunch ordering has closed");

        let record = lunch(&svc, "93800", None, true).unwrap();
        assert!(record.admin_modified);
        assert_eq!(record.date, d("2024-01-10"));
    }

    #[test]
    fn test_create_for_past_date_rejected() {
        let (_dir, svc, _) = setup("2024-01-10 07:00:00");
        let err = svc
            .create_order("93800", MealType::Dinner, DietType::Veg, RicePortion::Half, Some(d("2024-01-09")), false)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CutoffPassed);
    }

    #[test]
    fn test_create_unknown_employee() {
        let (_dir, svc, _) = setup("2024-01-10 07:00:00");
        let err = lunch(&svc, "NOBODY", None, true).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
    }

    #[test]
    fn test_late_order_for_unknown_employee_reports_cutoff() {
        let (_dir, svc, _) = setup("2024-01-10 09:00:00");
        let err = lunch(&svc, "NOBODY", None, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::CutoffPassed);
    }

    #[test]
    fn test_create_overwrites_existing() {
        let (_dir, svc, clock) = setup("2024-01-10 07:00:00");
        lunch(&svc, "93800", None, false).unwrap();
        clock.set(d("2024-01-10").and_hms_opt(7, 30, 15).unwrap());
        svc.create_order("93800", MealType::Lunch, DietType::Veg, RicePortion::Half, None, false)
            .unwrap();

        let today = svc.today_orders("93800");
        let slot = today.lunch.unwrap();
        assert_eq!(slot.diet_type, DietType::Veg);
        assert_eq!(slot.order_time, NaiveTime::from_hms_opt(7, 30, 15));
        assert!(today.dinner.is_none());
    }

    #[test]
    fn test_cancel() {
        let (_dir, svc, _) = setup("2024-01-10 07:00:00");
        lunch(&svc, "93800", None, false).unwrap();

        svc.cancel_order("93800", MealType::Lunch, None, false).unwrap();
        let err = svc.cancel_order("93800", MealType::Lunch, None, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_cancel_after_cutoff() {
        let (_dir, svc, clock) = setup("2024-01-10 07:00:00");
        lunch(&svc, "93800", None, false).unwrap();
        clock.set(d("2024-01-10").and_hms_opt(9, 0, 0).unwrap());

        let err = svc.cancel_order("93800", MealType::Lunch, None, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::CutoffPassed);
        svc.cancel_order("93800", MealType::Lunch, None, true).unwrap();
    }

    #[test]
    fn test_update_order() {
        let (_dir, svc, clock) = setup("2024-01-10 07:00:00");
        lunch(&svc, "93800", None, false).unwrap();
        clock.set(d("2024-01-10").and_hms_opt(18, 0, 0).unwrap());

        let record = svc
            .update_order(
                "93800",
                MealType::Lunch,
                d("2024-01-10"),
                OrderChange::Set {
                    diet_type: DietType::Veg,
                    rice_portion: RicePortion::Half,
                },
            )
            .unwrap()
            .unwrap();
        assert!(record.admin_modified);
        assert_eq!(record.diet_type, DietType::Veg);
        assert_eq!(record.order_time, NaiveTime::from_hms_opt(7, 0, 0));

        svc.update_order("93800", MealType::Lunch, d("2024-01-10"), OrderChange::Cancel)
            .unwrap();
        let err = svc
            .update_order("93800", MealType::Lunch, d("2024-01-10"), OrderChange::Cancel)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_update_missing_order() {
        let (_dir, svc, _) = setup("2024-01-10 07:00:00");
        let err = svc
            .update_order(
                "93800",
                MealType::Dinner,
                d("2024-01-10"),
                OrderChange::Set {
                    diet_type: DietType::Veg,
                    rice_portion: RicePortion::Full,
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_today_orders_cutoff_flags() {
        let (_dir, svc, _) = setup("2024-01-10 12:00:00");
        let today = svc.today_orders("93800");
        assert!(today.lunch_cutoff);
        assert!(!today.dinner_cutoff);
        assert!(svc.check_cutoff(MealType::Lunch, None));
        assert!(!svc.check_cutoff(MealType::Lunch, Some(d("2024-01-11"))));
    }

    #[test]
    fn test_weekly_orders_has_every_weekday() {
        let (_dir, svc, _) = setup("2024-01-10 07:00:00");
        lunch(&svc, "93800", Some(d("2024-01-11")), false).unwrap();

        let week = svc.weekly_orders("93800", WeekType::Current);
        assert_eq!(week.len(), 5);
        assert!(week[&d("2024-01-11")].lunch.is_some());
        assert!(week[&d("2024-01-11")].dinner.is_none());
        assert!(week[&d("2024-01-08")].lunch.is_none());

        let next = svc.weekly_orders("93800", WeekType::Next);
        assert!(next.contains_key(&d("2024-01-15")));

        let month = svc.weekly_orders("93800", WeekType::Month);
        assert_eq!(month.len(), 31);
    }

    #[test]
    fn test_save_weekly_orders_reports_failures() {
        let (_dir, svc, _) = setup("2024-01-10 09:00:00");
        let items = vec![
            WeeklyOrderItem {
                date: d("2024-01-10"),
                meal_type: MealType::Lunch,
                diet_type: Some(DietType::Meat),
                rice_portion: Some(RicePortion::Full),
            },
            WeeklyOrderItem {
                date: d("2024-01-10"),
                meal_type: MealType::Dinner,
                diet_type: Some(DietType::Veg),
                rice_portion: Some(RicePortion::Half),
            },
            WeeklyOrderItem {
                date: d("2024-01-11"),
                meal_type: MealType::Lunch,
                diet_type: None,
                rice_portion: Some(RicePortion::Full),
            },
        ];

        let result = svc.save_weekly_orders("93800", &items);
        assert_eq!(result.processed, 3);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.error_count, 2);
        assert_eq!(result.errors[0], "2024-01-10 LUNCH: Lunch ordering has closed");
        assert_eq!(result.errors[1], "2024-01-11 LUNCH: Order not found");

        let today = svc.today_orders("93800");
        assert!(today.dinner.is_some());
    }

    #[test]
    fn test_create_keeps_orders_next_to_unreadable_entry() {
        let (dir, svc, _) = setup("2024-01-09 07:00:00");
        let path = dir.path().join(crate::db::ORDERS_FILE);
        std::fs::write(
            &path,
            r#"{
                "2024-01-09_93800_LUNCH": {"EmpID":"93800","MealType":"LUNCH","DietType":"MEAT","RicePortion":"FULL","IsOrdered":true,"OrderTime":"07:30:00","AdminModified":false},
                "2024-01-09_28109_LUNCH": {"EmpID":"28109","MealType":"LUNCH","DietType":"","RicePortion":"","IsOrdered":true,"OrderTime":"07:30:00","AdminModified":true}
            }"#,
        )
        .unwrap();

        svc.create_order("93800", MealType::Dinner, DietType::Veg, RicePortion::Half, None, false)
            .unwrap();

        let today = svc.today_orders("93800");
        assert!(today.lunch.is_some());
        assert!(today.dinner.is_some());

        let stored: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored["2024-01-09_28109_LUNCH"]["DietType"], "");
        assert_eq!(stored["2024-01-09_93800_DINNER"]["DietType"], "VEG");
    }
}
