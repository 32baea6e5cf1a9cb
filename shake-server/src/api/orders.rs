//! Order endpoints

use axum::{Extension, extract::State, http::StatusCode};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    AuditAction, CalculateOrderRequest, CreateOrderRequest, DayOfWeekReport, OrderListQuery,
    OrderListResponse, OrderWithDrinks, PriceBreakdown,
};

use crate::auth::CurrentUser;
use crate::db::{self, orders::MarkPaid};
use crate::error::ServiceError;
use crate::services::{changes, order_service};
use crate::state::AppState;

use super::extract::{Json, Path, Query};
use super::{ApiResult, parse_date_param};

/// POST /api/orders/calculate
pub async fn calculate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CalculateOrderRequest>,
) -> ApiResult<PriceBreakdown> {
    let breakdown = order_service::calculate(&state.store, user.id, &req.drinks).await?;
    Ok(ApiResponse::success(breakdown))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, ApiResponse<OrderWithDrinks>), ServiceError> {
    let order = order_service::create_order(&state.store, user.id, &req).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Order created successfully", order),
    ))
}

/// GET /api/orders/mine
pub async fn my_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<OrderListResponse> {
    let orders = db::orders::list_for_user(&state.pool, user.id).await?;
    Ok(ApiResponse::success(OrderListResponse {
        total_orders: orders.len(),
        orders,
    }))
}

/// GET /api/orders/{id}
///
/// Patrons may only read their own orders.
pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderWithDrinks> {
    let order = db::orders::find_with_drinks(&state.pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", order_id))?;

    if !user.is_manager() && order.order.user_id != user.id {
        return Err(AppError::permission_denied(
            "Access denied. You can only view your own orders.",
        )
        .into());
    }

    Ok(ApiResponse::success(order))
}

/// GET /api/orders (manager)
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<OrderListResponse> {
    let filter = db::orders::OrderFilter {
        start: parse_date_param(query.start_date.as_deref(), "start_date")?,
        end: parse_date_param(query.end_date.as_deref(), "end_date")?,
        is_paid: query.is_paid,
    };
    let orders = db::orders::list_all(&state.pool, &filter).await?;
    Ok(ApiResponse::success(OrderListResponse {
        total_orders: orders.len(),
        orders,
    }))
}

/// POST /api/orders/{id}/mark-paid (manager)
pub async fn mark_paid(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderWithDrinks> {
    let now = shared::util::now_millis();

    let mut tx = state.pool.begin().await?;
    let order = match db::orders::mark_paid(&mut tx, order_id).await? {
        MarkPaid::Paid(order) => order,
        MarkPaid::AlreadyPaid => {
            return Err(AppError::new(ErrorCode::OrderAlreadyPaid)
                .with_detail("id", order_id)
                .into());
        }
        MarkPaid::NotFound => {
            return Err(AppError::new(ErrorCode::OrderNotFound)
                .with_detail("id", order_id)
                .into());
        }
    };
    db::audit::log(
        &mut *tx,
        user.id,
        AuditAction::MarkOrderPaid,
        &changes::order_paid(order.id),
        now,
    )
    .await?;
    let drinks = db::orders::drinks_for(&mut *tx, &[order.id]).await?;
    tx.commit().await?;

    tracing::info!(order_id, manager_id = user.id, "Order marked paid");

    Ok(ApiResponse::success_with_message(
        "Order marked as paid",
        OrderWithDrinks {
            order,
            drinks,
            user: None,
        },
    ))
}

/// GET /api/orders/reports/day-of-week (manager)
pub async fn day_of_week_report(State(state): State<AppState>) -> ApiResult<DayOfWeekReport> {
    let report = db::reports::day_of_week(&state.pool).await?;
    Ok(ApiResponse::success(report))
}
