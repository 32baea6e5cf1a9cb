//! User accounts

use shared::models::{Role, User};
use sqlx::PgPool;

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, firstname, email, mobile, hashed_password, role, created_at
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, firstname, email, mobile, hashed_password, role, created_at
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub struct NewUser<'a> {
    pub firstname: &'a str,
    pub email: &'a str,
    pub mobile: &'a str,
    pub hashed_password: &'a str,
    pub role: Role,
}

/// Insert a user; `Ok(None)` when the email is already registered.
pub async fn create(
    pool: &PgPool,
    user: &NewUser<'_>,
    now: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (firstname, email, mobile, hashed_password, role, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (email) DO NOTHING
         RETURNING id, firstname, email, mobile, hashed_password, role, created_at",
    )
    .bind(user.firstname)
    .bind(user.email)
    .bind(user.mobile)
    .bind(user.hashed_password)
    .bind(user.role.as_str())
    .bind(now)
    .fetch_optional(pool)
    .await
}
