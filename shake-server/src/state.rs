//! Application state

use sqlx::PgPool;

use crate::auth::RateLimiter;
use crate::config::{BootstrapManager, Config};
use crate::db::{self, PgStore};
use crate::error::BoxError;
use crate::util::hash_password;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Provider implementation used by the order service
    pub store: PgStore,
    /// JWT signing secret
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Rate limiter for login/signup routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Connect, run migrations and make sure the bootstrap manager exists
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        if let Some(manager) = &config.bootstrap_manager {
            ensure_manager(&pool, manager).await?;
        }

        Ok(Self::with_pool(pool, config))
    }

    /// Build state around an existing pool (no migrations)
    pub fn with_pool(pool: PgPool, config: &Config) -> Self {
        Self {
            store: PgStore::new(pool.clone()),
            pool,
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiry_hours: config.jwt_expiry_hours,
            rate_limiter: RateLimiter::new(config.trust_proxy),
        }
    }
}

async fn ensure_manager(pool: &PgPool, manager: &BootstrapManager) -> Result<(), BoxError> {
    if let Some(existing) = db::users::find_by_email(pool, &manager.email).await? {
        if !existing.role().is_manager() {
            tracing::warn!(
                email = %manager.email,
                "Bootstrap manager email belongs to a patron account, leaving it unchanged"
            );
        }
        return Ok(());
    }

    let hashed = hash_password(&manager.password).map_err(|e| e.to_string())?;
    let new_user = db::users::NewUser {
        firstname: &manager.firstname,
        email: &manager.email,
        mobile: "",
        hashed_password: &hashed,
        role: shared::models::Role::Manager,
    };
    if let Some(user) = db::users::create(pool, &new_user, shared::util::now_millis()).await? {
        tracing::info!(user_id = user.id, email = %user.email, "Bootstrap manager created");
    }
    Ok(())
}
