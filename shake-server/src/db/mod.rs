//! Database access layer (PostgreSQL)
//!
//! One module per table group. [`PgStore`] adapts these queries to the
//! provider traits the order service prices against.

pub mod audit;
pub mod catalog;
pub mod config;
pub mod orders;
pub mod reports;
pub mod users;

use async_trait::async_trait;
use shared::models::{AuditAction, CatalogKind, OrderWithDrinks, ShopConfig};
use sqlx::PgPool;

use crate::error::BoxError;
use crate::pricing::{CatalogSnapshot, PaidOrder};
use crate::services::{
    CatalogProvider, ConfigProvider, NewOrder, OrderHistoryProvider, OrderPersistence, changes,
};

/// PostgreSQL error codes the API maps to conflicts
pub mod pg_codes {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
}

/// Whether `err` is a database error with the given SQLSTATE
pub fn is_sql_state(err: &sqlx::Error, code: &str) -> bool {
    err.as_database_error()
        .and_then(|e| e.code())
        .is_some_and(|c| c == code)
}

/// Provider implementation backed by the connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigProvider for PgStore {
    async fn shop_config(&self) -> Result<Option<ShopConfig>, BoxError> {
        Ok(config::get(&self.pool).await?)
    }
}

#[async_trait]
impl OrderHistoryProvider for PgStore {
    async fn paid_orders(&self, user_id: i64) -> Result<Vec<PaidOrder>, BoxError> {
        Ok(orders::paid_orders(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl CatalogProvider for PgStore {
    async fn catalog_snapshot(&self) -> Result<CatalogSnapshot, BoxError> {
        let (flavours, toppings, consistencies) = tokio::try_join!(
            catalog::list(&self.pool, CatalogKind::Flavour),
            catalog::list(&self.pool, CatalogKind::Topping),
            catalog::list(&self.pool, CatalogKind::Consistency),
        )?;
        Ok(CatalogSnapshot::new(flavours, toppings, consistencies))
    }
}

#[async_trait]
impl OrderPersistence for PgStore {
    async fn insert_order(&self, new_order: NewOrder<'_>) -> Result<OrderWithDrinks, BoxError> {
        let mut tx = self.pool.begin().await?;

        let order = orders::insert(&mut tx, &new_order).await?;
        let change = changes::order_created(order.id, order.total_amount);
        audit::log(
            &mut *tx,
            new_order.user_id,
            AuditAction::CreateOrder,
            &change,
            new_order.created_at,
        )
        .await?;
        let drinks = orders::drinks_for(&mut *tx, &[order.id]).await?;

        tx.commit().await?;

        Ok(OrderWithDrinks {
            order,
            drinks,
            user: None,
        })
    }
}
