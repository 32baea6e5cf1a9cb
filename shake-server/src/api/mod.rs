//! HTTP API
//!
//! Success and error bodies share the [`ApiResponse`] envelope.

pub mod auth;
pub mod extract;
pub mod health;
pub mod lookups;
pub mod orders;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{Router, middleware};
use http::{HeaderValue, Method, header};
use shared::error::{ApiResponse, AppError, ErrorCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::rate_limit::{login_rate_limit, signup_rate_limit};
use crate::auth::{require_auth, require_manager};
use crate::error::ServiceError;
use crate::state::AppState;

/// Request bodies are small JSON documents
const MAX_BODY_BYTES: usize = 64 * 1024;

pub type ApiResult<T> = Result<ApiResponse<T>, ServiceError>;

/// Parse an optional date query parameter into Unix millis
pub fn parse_date_param(value: Option<&str>, field: &str) -> Result<Option<i64>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => shared::util::parse_timestamp_millis(raw).map(Some).ok_or_else(|| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid {field}"))
                .with_detail("field", field)
                .with_detail("value", raw)
        }),
    }
}

/// CORS: a single configured origin, or permissive when unset
pub fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match allow_origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let manager = || middleware::from_fn(require_manager);

    // Public account routes (rate limited per IP)
    let accounts = Router::new()
        .route(
            "/api/auth/signup",
            post(auth::signup).route_layer(middleware::from_fn_with_state(
                state.clone(),
                signup_rate_limit,
            )),
        )
        .route(
            "/api/auth/login",
            post(auth::login).route_layer(middleware::from_fn_with_state(
                state.clone(),
                login_rate_limit,
            )),
        );

    // Authenticated routes; manager-only methods carry their own layer
    let authenticated = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/lookups", get(lookups::get_lookups))
        .route(
            "/api/lookups/config",
            put(lookups::update_config).route_layer(manager()),
        )
        .route(
            "/api/lookups/audit-logs",
            get(lookups::audit_logs).route_layer(manager()),
        )
        .route(
            "/api/lookups/{kind}",
            post(lookups::create_item).route_layer(manager()),
        )
        .route(
            "/api/lookups/{kind}/{id}",
            put(lookups::update_item)
                .delete(lookups::delete_item)
                .route_layer(manager()),
        )
        .route("/api/orders/calculate", post(orders::calculate))
        .route(
            "/api/orders",
            post(orders::create_order).merge(get(orders::list_orders).route_layer(manager())),
        )
        .route("/api/orders/mine", get(orders::my_orders))
        .route(
            "/api/orders/reports/day-of-week",
            get(orders::day_of_week_report).route_layer(manager()),
        )
        .route("/api/orders/{id}", get(orders::get_order))
        .route(
            "/api/orders/{id}/mark-paid",
            post(orders::mark_paid).route_layer(manager()),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health_check))
        .merge(accounts)
        .merge(authenticated)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
