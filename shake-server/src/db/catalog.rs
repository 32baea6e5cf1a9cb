//! Flavours, toppings and consistencies
//!
//! The three tables share one shape, so every query takes a [`CatalogKind`]
//! and interpolates its (fixed, trusted) table name.

use shared::models::{CatalogItem, CatalogKind};
use sqlx::{PgExecutor, PgPool};

pub async fn list(pool: &PgPool, kind: CatalogKind) -> Result<Vec<CatalogItem>, sqlx::Error> {
    let sql = format!("SELECT id, name, fee FROM {} ORDER BY name", kind.table());
    sqlx::query_as(&sql).fetch_all(pool).await
}

pub async fn find<'e>(
    executor: impl PgExecutor<'e>,
    kind: CatalogKind,
    id: i64,
) -> Result<Option<CatalogItem>, sqlx::Error> {
    let sql = format!("SELECT id, name, fee FROM {} WHERE id = $1", kind.table());
    sqlx::query_as(&sql).bind(id).fetch_optional(executor).await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    kind: CatalogKind,
    name: &str,
    fee: f64,
    now: i64,
) -> Result<CatalogItem, sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} (name, fee, created_at, updated_at) VALUES ($1, $2, $3, $3)
         RETURNING id, name, fee",
        kind.table()
    );
    sqlx::query_as(&sql)
        .bind(name)
        .bind(fee)
        .bind(now)
        .fetch_one(executor)
        .await
}

/// Partial update; absent fields keep their value.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    kind: CatalogKind,
    id: i64,
    name: Option<&str>,
    fee: Option<f64>,
    now: i64,
) -> Result<Option<CatalogItem>, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET name = COALESCE($1, name), fee = COALESCE($2, fee), updated_at = $3
         WHERE id = $4
         RETURNING id, name, fee",
        kind.table()
    );
    sqlx::query_as(&sql)
        .bind(name)
        .bind(fee)
        .bind(now)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Returns whether a row was deleted.
pub async fn delete<'e>(
    executor: impl PgExecutor<'e>,
    kind: CatalogKind,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
    let result = sqlx::query(&sql).bind(id).execute(executor).await?;
    Ok(result.rows_affected() > 0)
}
