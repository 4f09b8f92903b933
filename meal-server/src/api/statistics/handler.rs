//! Statistics API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{EmployeeOrderStats, MealQuantityStat, ReportQuery};

use crate::core::ServerState;
use crate::reporting::DateRange;
use crate::utils::{ApiResponse, AppResult, ok_list};

/// 按日期/餐别/荤素/饭量统计份数 (厨房备餐用)
pub async fn meal_quantity(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<Vec<MealQuantityStat>>>> {
    let (range, filter) = DateRange::from_query(&query)?;
    Ok(ok_list(
        state.report_service().meal_quantity_stats(&range, &filter),
    ))
}

/// 员工订餐次数统计，无订单的员工也列出 (计数为 0)
pub async fn employee_orders(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<Vec<EmployeeOrderStats>>>> {
    let (range, filter) = DateRange::from_query(&query)?;
    Ok(ok_list(
        state.report_service().employee_order_stats(&range, &filter),
    ))
}
