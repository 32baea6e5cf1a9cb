//! Audit log operations

use shared::models::{AuditAction, AuditChange, AuditLogEntry};
use sqlx::{PgExecutor, PgPool};

/// Maximum rows returned by [`query`]
pub const QUERY_LIMIT: i64 = 100;

/// Write an audit log entry
pub async fn log<'e>(
    executor: impl PgExecutor<'e>,
    user_id: i64,
    action: AuditAction,
    change: &AuditChange,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs (user_id, action, field, old_value, new_value, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user_id)
    .bind(action.as_str())
    .bind(&change.field)
    .bind(&change.old_value)
    .bind(&change.new_value)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

/// Audit query filters, already parsed
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub action: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Newest first, joined with the acting user
pub async fn query(pool: &PgPool, filter: &AuditFilter) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT a.id, a.user_id, u.firstname AS user_firstname, u.email AS user_email,
               u.role AS user_role, a.action, a.field, a.old_value, a.new_value, a.created_at
        FROM audit_logs a
        JOIN users u ON u.id = a.user_id
        WHERE ($1::TEXT IS NULL OR a.action = $1)
            AND ($2::BIGINT IS NULL OR a.created_at >= $2)
            AND ($3::BIGINT IS NULL OR a.created_at <= $3)
        ORDER BY a.created_at DESC, a.id DESC
        LIMIT $4
        "#,
    )
    .bind(filter.action.as_deref())
    .bind(filter.start)
    .bind(filter.end)
    .bind(QUERY_LIMIT)
    .fetch_all(pool)
    .await
}
