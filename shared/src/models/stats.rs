//! Reporting DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::meal_order::{DietType, MealType, RicePortion};

/// Query string shared by order listings, statistics and export
///
/// Dates stay raw strings so a malformed value surfaces its parse message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(default)]
    pub date_from: String,
    #[serde(default)]
    pub date_to: String,
    #[serde(default)]
    pub emp_id: Option<String>,
    #[serde(default)]
    pub dept_code: Option<String>,
}

/// Dish count for one (date, meal, diet, portion) combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealQuantityStat {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub diet_type: DietType,
    pub rice_portion: RicePortion,
    pub count: usize,
}

/// Per-employee order tally over a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeOrderStats {
    pub emp_id: String,
    pub emp_name: String,
    pub dept_code: String,
    pub lunch_count: usize,
    pub dinner_count: usize,
    pub total_count: usize,
}

impl EmployeeOrderStats {
    pub fn zero(emp_id: impl Into<String>, emp_name: impl Into<String>, dept_code: impl Into<String>) -> Self {
        Self {
            emp_id: emp_id.into(),
            emp_name: emp_name.into(),
            dept_code: dept_code.into(),
            lunch_count: 0,
            dinner_count: 0,
            total_count: 0,
        }
    }

    pub fn tally(&mut self, meal_type: MealType) {
        match meal_type {
            MealType::Lunch => self.lunch_count += 1,
            MealType::Dinner => self.dinner_count += 1,
        }
        self.total_count += 1;
    }
}
