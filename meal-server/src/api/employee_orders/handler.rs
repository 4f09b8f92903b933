//! Employee Order Handlers
//!
//! The employee is always the one in the session; request bodies never name
//! another employee.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::models::{
    BatchResult, CancelOrderRequest, CreateOrderRequest, DayOrders, OrderRecord, ReportQuery,
    TodayOrders, WeekType, WeeklyOrdersRequest,
};

use crate::auth::EmployeeSession;
use crate::core::ServerState;
use crate::reporting::DateRange;
use crate::utils::{ApiResponse, AppError, AppResult, done, ok, ok_list, ok_with_message};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    #[serde(default)]
    pub week_type: Option<String>,
}

pub async fn today_orders(
    State(state): State<ServerState>,
    session: EmployeeSession,
) -> Json<ApiResponse<TodayOrders>> {
    ok(state.order_service().today_orders(&session.emp_id))
}

/// Place an order for the logged-in employee
pub async fn create(
    State(state): State<ServerState>,
    session: EmployeeSession,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderRecord>>> {
    let (Some(meal_type), Some(diet_type), Some(rice_portion)) =
        (req.meal_type, req.diet_type, req.rice_portion)
    else {
        return Err(AppError::validation(
            "Meal type, diet type and rice portion are required",
        ));
    };

    let record = state.order_service().create_order(
        &session.emp_id,
        meal_type,
        diet_type,
        rice_portion,
        req.date,
        false,
    )?;
    Ok(ok_with_message(record, "Order placed"))
}

/// Cancel one of the logged-in employee's orders
pub async fn cancel(
    State(state): State<ServerState>,
    session: EmployeeSession,
    Json(req): Json<CancelOrderRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let meal_type = req
        .meal_type
        .ok_or_else(|| AppError::validation("Meal type is required"))?;

    state
        .order_service()
        .cancel_order(&session.emp_id, meal_type, req.date, false)?;
    Ok(done("Order cancelled"))
}

/// The weekly grid: one entry per day of the selected span
pub async fn weekly_orders(
    State(state): State<ServerState>,
    session: EmployeeSession,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<ApiResponse<BTreeMap<NaiveDate, DayOrders>>>> {
    let week_type = match query.week_type.as_deref() {
        Some(raw) => raw
            .parse::<WeekType>()
            .map_err(|e| AppError::invalid_format(e.to_string()))?,
        None => WeekType::default(),
    };
    Ok(ok(state
        .order_service()
        .weekly_orders(&session.emp_id, week_type)))
}

/// Save the weekly grid; individual cell failures are reported, not fatal
pub async fn save_weekly_orders(
    State(state): State<ServerState>,
    session: EmployeeSession,
    Json(req): Json<WeeklyOrdersRequest>,
) -> Json<ApiResponse<BatchResult>> {
    let result = state
        .order_service()
        .save_weekly_orders(&session.emp_id, &req.orders);
    let message = format!(
        "Processed {} item(s): {} succeeded, {} failed",
        result.processed, result.success_count, result.error_count
    );
    ok_with_message(result, message)
}

pub async fn history(
    State(state): State<ServerState>,
    session: EmployeeSession,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<Vec<OrderRecord>>>> {
    let range = DateRange::parse(&query.date_from, &query.date_to)?;
    Ok(ok_list(state.order_service().history(&session.emp_id, &range)))
}
