//! Menu and configuration endpoints
//!
//! Everyone signed in can read the lookups; writes are manager-only and
//! leave field-level audit entries in the same transaction.

use axum::{Extension, extract::State, http::StatusCode};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    AuditLogEntry, AuditLogQuery, CatalogItem, CatalogItemCreate, CatalogItemUpdate, CatalogKind,
    Lookups, ShopConfig, ShopConfigUpdate,
};

use crate::auth::CurrentUser;
use crate::db::{self, pg_codes};
use crate::error::ServiceError;
use crate::pricing::money::{MAX_DISCOUNT_AMOUNT, MAX_FEE};
use crate::services::changes;
use crate::state::AppState;

use super::extract::{Json, Path, Query};
use super::{ApiResult, parse_date_param};

fn catalog_kind(segment: &str) -> Result<CatalogKind, AppError> {
    CatalogKind::from_table(segment).ok_or_else(|| AppError::not_found("Catalog list"))
}

fn item_not_found(kind: CatalogKind, id: i64) -> AppError {
    AppError::with_message(kind.not_found_code(), format!("{} not found", kind.label()))
        .with_detail("id", id)
}

fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::required("name"));
    }
    Ok(name)
}

fn validate_fee(fee: f64) -> Result<f64, AppError> {
    if !fee.is_finite() || !(0.0..=MAX_FEE).contains(&fee) {
        return Err(AppError::with_message(
            ErrorCode::InvalidFee,
            format!("Fee must be between 0 and {MAX_FEE}"),
        )
        .with_detail("fee", fee.to_string()));
    }
    Ok(fee)
}

/// Map write failures on catalog tables to conflicts where they are expected
fn catalog_write_error(kind: CatalogKind, err: sqlx::Error) -> ServiceError {
    if db::is_sql_state(&err, pg_codes::UNIQUE_VIOLATION) {
        return AppError::with_message(
            ErrorCode::CatalogNameExists,
            format!("A {} with this name already exists", kind.label().to_lowercase()),
        )
        .into();
    }
    if db::is_sql_state(&err, pg_codes::FOREIGN_KEY_VIOLATION) {
        return AppError::with_message(
            ErrorCode::CatalogItemInUse,
            format!("{} is used by existing orders and cannot be deleted", kind.label()),
        )
        .into();
    }
    err.into()
}

/// GET /api/lookups
pub async fn get_lookups(State(state): State<AppState>) -> ApiResult<Lookups> {
    let (flavours, toppings, consistencies, config) = tokio::try_join!(
        db::catalog::list(&state.pool, CatalogKind::Flavour),
        db::catalog::list(&state.pool, CatalogKind::Topping),
        db::catalog::list(&state.pool, CatalogKind::Consistency),
        db::config::get(&state.pool),
    )?;

    Ok(ApiResponse::success(Lookups {
        flavours,
        toppings,
        consistencies,
        config,
    }))
}

/// POST /api/lookups/{kind}
pub async fn create_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(segment): Path<String>,
    Json(req): Json<CatalogItemCreate>,
) -> Result<(StatusCode, ApiResponse<CatalogItem>), ServiceError> {
    let kind = catalog_kind(&segment)?;
    let name = validate_name(req.name.as_deref().unwrap_or_default())?;
    let fee = validate_fee(req.fee.ok_or_else(|| AppError::required("fee"))?)?;
    let now = shared::util::now_millis();

    let mut tx = state.pool.begin().await?;
    let item = db::catalog::create(&mut *tx, kind, name, fee, now)
        .await
        .map_err(|e| catalog_write_error(kind, e))?;
    db::audit::log(
        &mut *tx,
        user.id,
        kind.create_action(),
        &changes::catalog_created(kind, &item),
        now,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(kind = kind.label(), id = item.id, name = %item.name, "Catalog item created");

    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message(format!("{} created successfully", kind.label()), item),
    ))
}

/// PUT /api/lookups/{kind}/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((segment, id)): Path<(String, i64)>,
    Json(req): Json<CatalogItemUpdate>,
) -> ApiResult<CatalogItem> {
    let kind = catalog_kind(&segment)?;
    let name = req.name.as_deref().map(validate_name).transpose()?;
    let fee = req.fee.map(validate_fee).transpose()?;
    let now = shared::util::now_millis();

    let mut tx = state.pool.begin().await?;
    let before = db::catalog::find(&mut *tx, kind, id)
        .await?
        .ok_or_else(|| item_not_found(kind, id))?;
    let after = db::catalog::update(&mut *tx, kind, id, name, fee, now)
        .await
        .map_err(|e| catalog_write_error(kind, e))?
        .ok_or_else(|| item_not_found(kind, id))?;

    for change in changes::catalog_updated(&before, &after) {
        db::audit::log(&mut *tx, user.id, kind.update_action(), &change, now).await?;
    }
    tx.commit().await?;

    tracing::info!(kind = kind.label(), id, "Catalog item updated");

    Ok(ApiResponse::success_with_message(
        format!("{} updated successfully", kind.label()),
        after,
    ))
}

/// DELETE /api/lookups/{kind}/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((segment, id)): Path<(String, i64)>,
) -> ApiResult<()> {
    let kind = catalog_kind(&segment)?;
    let now = shared::util::now_millis();

    let mut tx = state.pool.begin().await?;
    let item = db::catalog::find(&mut *tx, kind, id)
        .await?
        .ok_or_else(|| item_not_found(kind, id))?;
    db::catalog::delete(&mut *tx, kind, id)
        .await
        .map_err(|e| catalog_write_error(kind, e))?;
    db::audit::log(
        &mut *tx,
        user.id,
        kind.delete_action(),
        &changes::catalog_deleted(kind, &item),
        now,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(kind = kind.label(), id, name = %item.name, "Catalog item deleted");

    Ok(ApiResponse::ok_with_message(format!(
        "{} deleted successfully",
        kind.label()
    )))
}

/// Merge a partial update into the current config and validate the result
pub fn apply_config_update(
    current: &ShopConfig,
    update: &ShopConfigUpdate,
) -> Result<ShopConfig, AppError> {
    let next = ShopConfig {
        max_drinks: update.max_drinks.unwrap_or(current.max_drinks),
        vat_percentage: update.vat_percentage.unwrap_or(current.vat_percentage),
        discount_tier1_min_orders: update
            .discount_tier1_min_orders
            .unwrap_or(current.discount_tier1_min_orders),
        discount_tier1_min_drinks: update
            .discount_tier1_min_drinks
            .unwrap_or(current.discount_tier1_min_drinks),
        discount_tier2_min_orders: update
            .discount_tier2_min_orders
            .unwrap_or(current.discount_tier2_min_orders),
        discount_tier2_min_drinks: update
            .discount_tier2_min_drinks
            .unwrap_or(current.discount_tier2_min_drinks),
        discount_tier3_min_orders: update
            .discount_tier3_min_orders
            .unwrap_or(current.discount_tier3_min_orders),
        discount_tier3_min_drinks: update
            .discount_tier3_min_drinks
            .unwrap_or(current.discount_tier3_min_drinks),
        max_discount_amount: update
            .max_discount_amount
            .unwrap_or(current.max_discount_amount),
        updated_at: current.updated_at,
    };

    let invalid = |field: &str, rule: &str| {
        AppError::with_message(ErrorCode::InvalidConfigValue, format!("{field} {rule}"))
            .with_detail("field", field)
    };

    if next.max_drinks < 1 {
        return Err(invalid("max_drinks", "must be at least 1"));
    }
    if !next.vat_percentage.is_finite() || !(0.0..=100.0).contains(&next.vat_percentage) {
        return Err(invalid("vat_percentage", "must be between 0 and 100"));
    }
    for tier in next.tiers() {
        if tier.min_orders < 0 {
            return Err(invalid(
                &format!("discount_tier{}_min_orders", tier.level),
                "must not be negative",
            ));
        }
        if tier.min_drinks < 1 {
            return Err(invalid(
                &format!("discount_tier{}_min_drinks", tier.level),
                "must be at least 1",
            ));
        }
    }
    if !next.max_discount_amount.is_finite()
        || !(0.0..=MAX_DISCOUNT_AMOUNT).contains(&next.max_discount_amount)
    {
        return Err(invalid(
            "max_discount_amount",
            &format!("must be between 0 and {MAX_DISCOUNT_AMOUNT}"),
        ));
    }

    Ok(next)
}

/// PUT /api/lookups/config
pub async fn update_config(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(update): Json<ShopConfigUpdate>,
) -> ApiResult<ShopConfig> {
    let now = shared::util::now_millis();

    let mut tx = state.pool.begin().await?;
    let current = db::config::get_for_update(&mut *tx)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ConfigNotFound))?;

    let mut next = apply_config_update(&current, &update)?;
    let changes = changes::config_updated(&current, &next);
    if changes.is_empty() {
        return Ok(ApiResponse::success_with_message("No changes", current));
    }

    next.updated_at = now;
    let saved = db::config::save(&mut *tx, &next).await?;
    for change in &changes {
        db::audit::log(&mut *tx, user.id, shared::models::AuditAction::UpdateConfig, change, now)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(user_id = user.id, fields = changes.len(), "Shop config updated");

    Ok(ApiResponse::success_with_message(
        "Config updated successfully",
        saved,
    ))
}

/// GET /api/lookups/audit-logs
pub async fn audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Vec<AuditLogEntry>> {
    let filter = db::audit::AuditFilter {
        action: query
            .action
            .map(|a| a.trim().to_uppercase())
            .filter(|a| !a.is_empty()),
        start: parse_date_param(query.start_date.as_deref(), "start_date")?,
        end: parse_date_param(query.end_date.as_deref(), "end_date")?,
    };

    let entries = db::audit::query(&state.pool, &filter).await?;
    Ok(ApiResponse::success(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fee() {
        assert_eq!(validate_fee(0.0).unwrap(), 0.0);
        assert_eq!(validate_fee(12.5).unwrap(), 12.5);
        assert_eq!(validate_fee(-1.0).unwrap_err().code, ErrorCode::InvalidFee);
        assert_eq!(validate_fee(f64::NAN).unwrap_err().code, ErrorCode::InvalidFee);

        assert_eq!(validate_fee(MAX_FEE).unwrap(), MAX_FEE);
        let err = validate_fee(MAX_FEE + 1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFee);
        assert_eq!(err.message, "Fee must be between 0 and 1000000");
        assert_eq!(validate_fee(1e29).unwrap_err().code, ErrorCode::InvalidFee);
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Oreo ").unwrap(), "Oreo");
        assert_eq!(validate_name("   ").unwrap_err().code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_catalog_kind_segment() {
        assert_eq!(catalog_kind("flavours").unwrap(), CatalogKind::Flavour);
        assert_eq!(catalog_kind("syrups").unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_apply_config_update_partial() {
        let current = ShopConfig::default();
        let update = ShopConfigUpdate {
            vat_percentage: Some(16.0),
            max_discount_amount: Some(75.0),
            ..Default::default()
        };
        let next = apply_config_update(&current, &update).unwrap();
        assert_eq!(next.vat_percentage, 16.0);
        assert_eq!(next.max_discount_amount, 75.0);
        assert_eq!(next.max_drinks, current.max_drinks);
        assert_eq!(next.discount_tier3_min_drinks, current.discount_tier3_min_drinks);
    }

    #[test]
    fn test_apply_config_update_rejects_bad_values() {
        let current = ShopConfig::default();
        let cases = [
            (
                ShopConfigUpdate {
                    max_drinks: Some(0),
                    ..Default::default()
                },
                "max_drinks",
            ),
            (
                ShopConfigUpdate {
                    vat_percentage: Some(101.0),
                    ..Default::default()
                },
                "vat_percentage",
            ),
            (
                ShopConfigUpdate {
                    discount_tier2_min_drinks: Some(0),
                    ..Default::default()
                },
                "discount_tier2_min_drinks",
            ),
            (
                ShopConfigUpdate {
                    max_discount_amount: Some(-5.0),
                    ..Default::default()
                },
                "max_discount_amount",
            ),
            (
                ShopConfigUpdate {
                    max_discount_amount: Some(MAX_DISCOUNT_AMOUNT + 1.0),
                    ..Default::default()
                },
                "max_discount_amount",
            ),
        ];
        for (update, field) in cases {
            let err = apply_config_update(&current, &update).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidConfigValue);
            assert_eq!(err.details.unwrap().get("field").unwrap(), field);
        }
    }
}
