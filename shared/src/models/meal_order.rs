//! Meal Order Model
//!
//! Orders live in one flat map keyed by `"{date}_{empId}_{mealType}"`.
//! Absence of a key means "no order" for that employee, day and meal.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::serde_helpers::{bool_false, empty_as_none, lenient_time, string_or_empty};

/// Date format used for keys, documents and the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error for enum/key strings that do not parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseModelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseModelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// 餐别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Lunch => "LUNCH",
            MealType::Dinner => "DINNER",
        }
    }

    /// Display name used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LUNCH" => Ok(MealType::Lunch),
            "DINNER" => Ok(MealType::Dinner),
            _ => Err(ParseModelError::new("meal type", s)),
        }
    }
}

/// 荤素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietType {
    Meat,
    Veg,
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Meat => "MEAT",
            DietType::Veg => "VEG",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietType {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MEAT" => Ok(DietType::Meat),
            "VEG" => Ok(DietType::Veg),
            _ => Err(ParseModelError::new("diet type", s)),
        }
    }
}

/// 饭量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RicePortion {
    Full,
    Half,
}

impl RicePortion {
    pub fn as_str(&self) -> &'static str {
        match self {
            RicePortion::Full => "FULL",
            RicePortion::Half => "HALF",
        }
    }
}

impl fmt::Display for RicePortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RicePortion {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FULL" => Ok(RicePortion::Full),
            "HALF" => Ok(RicePortion::Half),
            _ => Err(ParseModelError::new("rice portion", s)),
        }
    }
}

// ============================================================================
// Order key
// ============================================================================

/// Composite order key: one order per (date, employee, meal)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderKey {
    pub date: NaiveDate,
    pub emp_id: String,
    pub meal_type: MealType,
}

impl OrderKey {
    pub fn new(date: NaiveDate, emp_id: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            date,
            emp_id: emp_id.into(),
            meal_type,
        }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.date.format(DATE_FORMAT),
            self.emp_id,
            self.meal_type
        )
    }
}

impl FromStr for OrderKey {
    type Err = ParseModelError;

    /// Date is the first segment and meal type the last one; the employee id
    /// is everything in between, so ids containing `_` survive a round trip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseModelError::new("order key", s);
        let (date, rest) = s.split_once('_').ok_or_else(err)?;
        let (emp_id, meal) = rest.rsplit_once('_').ok_or_else(err)?;
        if emp_id.is_empty() {
            return Err(err());
        }
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| err())?;
        let meal_type = meal.parse::<MealType>().map_err(|_| err())?;
        Ok(Self::new(date, emp_id, meal_type))
    }
}

// ============================================================================
// Stored order
// ============================================================================

/// Order record, as stored in `orders.json` under its [`OrderKey`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealOrder {
    #[serde(rename = "EmpID", default, deserialize_with = "string_or_empty")]
    pub emp_id: String,
    #[serde(rename = "MealType")]
    pub meal_type: MealType,
    #[serde(rename = "DietType")]
    pub diet_type: DietType,
    #[serde(rename = "RicePortion")]
    pub rice_portion: RicePortion,
    #[serde(rename = "IsOrdered", default, deserialize_with = "bool_false")]
    pub is_ordered: bool,
    /// Wall-clock time of the last create, `HH:MM:SS`
    #[serde(rename = "OrderTime", default, with = "lenient_time")]
    pub order_time: Option<NaiveTime>,
    /// Last mutation came from an administrator
    #[serde(rename = "AdminModified", default, deserialize_with = "bool_false")]
    pub admin_modified: bool,
}

/// Order joined with its date, as returned by queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub date: NaiveDate,
    pub emp_id: String,
    pub meal_type: MealType,
    pub diet_type: DietType,
    pub rice_portion: RicePortion,
    pub is_ordered: bool,
    #[serde(with = "lenient_time")]
    pub order_time: Option<NaiveTime>,
    pub admin_modified: bool,
}

impl OrderRecord {
    pub fn from_order(date: NaiveDate, order: &MealOrder) -> Self {
        Self {
            date,
            emp_id: order.emp_id.clone(),
            meal_type: order.meal_type,
            diet_type: order.diet_type,
            rice_portion: order.rice_portion,
            is_ordered: order.is_ordered,
            order_time: order.order_time,
            admin_modified: order.admin_modified,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Employee create order payload (`date` omitted = today)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub meal_type: Option<MealType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub diet_type: Option<DietType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub rice_portion: Option<RicePortion>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<NaiveDate>,
}

/// Employee cancel order payload (`date` omitted = today)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub meal_type: Option<MealType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<NaiveDate>,
}

/// Admin create/cancel on behalf of an employee (cutoff bypassed)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderRequest {
    #[serde(default)]
    pub emp_id: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub meal_type: Option<MealType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub diet_type: Option<DietType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub rice_portion: Option<RicePortion>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<NaiveDate>,
}

/// Admin edit of an existing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub emp_id: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub meal_type: Option<MealType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub diet_type: Option<DietType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub rice_portion: Option<RicePortion>,
    #[serde(default)]
    pub is_cancelled: bool,
}

/// One cell of the weekly order grid; no diet/portion = cancel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyOrderItem {
    pub date: NaiveDate,
    pub meal_type: MealType,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub diet_type: Option<DietType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub rice_portion: Option<RicePortion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyOrdersRequest {
    #[serde(default)]
    pub orders: Vec<WeeklyOrderItem>,
}

/// Which span of days the weekly view covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekType {
    /// Monday to Friday of this week
    #[default]
    Current,
    /// Monday to Friday of next week
    Next,
    /// Whole calendar month
    Month,
}

impl FromStr for WeekType {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "" => Ok(WeekType::Current),
            "next" => Ok(WeekType::Next),
            "month" => Ok(WeekType::Month),
            _ => Err(ParseModelError::new("week type", s)),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Order summary shown on the employee's "today" panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSlot {
    pub diet_type: DietType,
    pub rice_portion: RicePortion,
    #[serde(with = "lenient_time")]
    pub order_time: Option<NaiveTime>,
    pub admin_modified: bool,
}

impl From<&MealOrder> for OrderSlot {
    fn from(order: &MealOrder) -> Self {
        Self {
            diet_type: order.diet_type,
            rice_portion: order.rice_portion,
            order_time: order.order_time,
            admin_modified: order.admin_modified,
        }
    }
}

/// Today's orders plus whether each meal is still open
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayOrders {
    pub date: NaiveDate,
    pub lunch: Option<OrderSlot>,
    pub dinner: Option<OrderSlot>,
    pub lunch_cutoff: bool,
    pub dinner_cutoff: bool,
}

/// Both meals of one day in the weekly grid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayOrders {
    #[serde(rename = "LUNCH")]
    pub lunch: Option<OrderRecord>,
    #[serde(rename = "DINNER")]
    pub dinner: Option<OrderRecord>,
}

impl DayOrders {
    pub fn slot_mut(&mut self, meal_type: MealType) -> &mut Option<OrderRecord> {
        match meal_type {
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }
}

/// Outcome of a weekly batch save
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub processed: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<String>,
}
