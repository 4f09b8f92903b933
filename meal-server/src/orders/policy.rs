//! Cutoff policy
//!
//! Lunch closes at 08:30 and dinner at 16:00, business local time. A past
//! date is always closed and a future date is always open; only today
//! compares the time of day, strictly (`now > cutoff`).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::models::MealType;

const LUNCH_CUTOFF: (u32, u32) = (8, 30);
const DINNER_CUTOFF: (u32, u32) = (16, 0);

/// Same-day cutoff for a meal
pub fn cutoff_time(meal_type: MealType) -> NaiveTime {
    let (hour, minute) = match meal_type {
        MealType::Lunch => LUNCH_CUTOFF,
        MealType::Dinner => DINNER_CUTOFF,
    };
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Whether ordering for `meal_type` on `target` has closed at `now`
pub fn is_cutoff_passed(meal_type: MealType, target: NaiveDate, now: NaiveDateTime) -> bool {
    let today = now.date();
    if target != today {
        return target < today;
    }
    now.time() > cutoff_time(meal_type)
}
