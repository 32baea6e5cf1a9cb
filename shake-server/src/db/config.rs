//! Shop configuration singleton

use shared::models::ShopConfig;
use sqlx::PgExecutor;

const COLUMNS: &str = "max_drinks, vat_percentage,
    discount_tier1_min_orders, discount_tier1_min_drinks,
    discount_tier2_min_orders, discount_tier2_min_drinks,
    discount_tier3_min_orders, discount_tier3_min_drinks,
    max_discount_amount, updated_at";

pub async fn get<'e>(executor: impl PgExecutor<'e>) -> Result<Option<ShopConfig>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM shop_config WHERE id = 1");
    sqlx::query_as(&sql).fetch_optional(executor).await
}

/// Row-locking read for read-modify-write inside a transaction
pub async fn get_for_update<'e>(
    executor: impl PgExecutor<'e>,
) -> Result<Option<ShopConfig>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM shop_config WHERE id = 1 FOR UPDATE");
    sqlx::query_as(&sql).fetch_optional(executor).await
}

pub async fn save<'e>(
    executor: impl PgExecutor<'e>,
    config: &ShopConfig,
) -> Result<ShopConfig, sqlx::Error> {
    let sql = format!(
        "UPDATE shop_config SET
            max_drinks = $1, vat_percentage = $2,
            discount_tier1_min_orders = $3, discount_tier1_min_drinks = $4,
            discount_tier2_min_orders = $5, discount_tier2_min_drinks = $6,
            discount_tier3_min_orders = $7, discount_tier3_min_drinks = $8,
            max_discount_amount = $9, updated_at = $10
         WHERE id = 1
         RETURNING {COLUMNS}"
    );
    sqlx::query_as(&sql)
        .bind(config.max_drinks)
        .bind(config.vat_percentage)
        .bind(config.discount_tier1_min_orders)
        .bind(config.discount_tier1_min_drinks)
        .bind(config.discount_tier2_min_orders)
        .bind(config.discount_tier2_min_drinks)
        .bind(config.discount_tier3_min_orders)
        .bind(config.discount_tier3_min_drinks)
        .bind(config.max_discount_amount)
        .bind(config.updated_at)
        .fetch_one(executor)
        .await
}
