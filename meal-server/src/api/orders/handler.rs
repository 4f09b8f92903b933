//! Admin Order Handlers

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use shared::models::{AdminOrderRequest, OrderRecord, ReportQuery, UpdateOrderRequest};

use crate::auth::AdminSession;
use crate::core::ServerState;
use crate::orders::OrderChange;
use crate::reporting::DateRange;
use crate::reporting::export::export_file_name;
use crate::utils::{ApiResponse, AppError, AppResult, done, ok_list, ok_with_message};

/// Ordered entries in a date range, optionally narrowed by employee / department
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<Vec<OrderRecord>>>> {
    let (range, filter) = DateRange::from_query(&query)?;
    Ok(ok_list(
        state.report_service().orders_by_date_range(&range, &filter),
    ))
}

/// Order on behalf of an employee (cutoff ignored)
pub async fn create(
    State(state): State<ServerState>,
    admin: AdminSession,
    Json(req): Json<AdminOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderRecord>>> {
    let (Some(meal_type), Some(diet_type), Some(rice_portion)) =
        (req.meal_type, req.diet_type, req.rice_portion)
    else {
        return Err(AppError::validation(
            "Meal type, diet type and rice portion are required",
        ));
    };
    if req.emp_id.trim().is_empty() {
        return Err(AppError::validation("Employee ID is required"));
    }

    let record = state.order_service().create_order(
        &req.emp_id,
        meal_type,
        diet_type,
        rice_portion,
        req.date,
        true,
    )?;
    tracing::info!(account = %admin.account, emp_id = %record.emp_id, "Order placed by administrator");
    Ok(ok_with_message(record, "Order placed"))
}

/// Change or cancel an existing order
pub async fn update(
    State(state): State<ServerState>,
    Json(req): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<Option<OrderRecord>>>> {
    let (Some(date), Some(meal_type)) = (req.date, req.meal_type) else {
        return Err(AppError::validation("Date and meal type are required"));
    };
    if req.emp_id.trim().is_empty() {
        return Err(AppError::validation("Employee ID is required"));
    }

    let change = if req.is_cancelled {
        OrderChange::Cancel
    } else {
        match (req.diet_type, req.rice_portion) {
            (Some(diet_type), Some(rice_portion)) => OrderChange::Set {
                diet_type,
                rice_portion,
            },
            _ => {
                return Err(AppError::validation(
                    "Diet type and rice portion are required",
                ));
            }
        }
    };

    let record = state
        .order_service()
        .update_order(&req.emp_id, meal_type, date, change)?;
    let message = if record.is_some() {
        "Order updated"
    } else {
        "Order cancelled"
    };
    Ok(ok_with_message(record, message))
}

/// Cancel on behalf of an employee (cutoff ignored)
pub async fn cancel(
    State(state): State<ServerState>,
    Json(req): Json<AdminOrderRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let meal_type = req
        .meal_type
        .ok_or_else(|| AppError::validation("Meal type is required"))?;
    if req.emp_id.trim().is_empty() {
        return Err(AppError::validation("Employee ID is required"));
    }

    state
        .order_service()
        .cancel_order(&req.emp_id, meal_type, req.date, true)?;
    Ok(done("Order cancelled"))
}

/// CSV download of the same rows as [`list`]
pub async fn export(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let (range, filter) = DateRange::from_query(&query)?;
    let csv = state.report_service().export_orders_csv(&range, &filter);
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(&range));

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
