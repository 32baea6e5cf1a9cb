//! Data providers the order service prices against
//!
//! `PgStore` implements these for production; tests plug in an in-memory
//! store.

use async_trait::async_trait;
use shared::models::{OrderWithDrinks, PriceBreakdown, ShopConfig};

use crate::error::BoxError;
use crate::pricing::{CatalogSnapshot, PaidOrder};

/// Current shop configuration (`None` when the singleton row is missing)
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn shop_config(&self) -> Result<Option<ShopConfig>, BoxError>;
}

/// A user's previously paid orders with their drink counts
#[async_trait]
pub trait OrderHistoryProvider: Send + Sync {
    async fn paid_orders(&self, user_id: i64) -> Result<Vec<PaidOrder>, BoxError>;
}

/// Flavour, topping and consistency lookup tables
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn catalog_snapshot(&self) -> Result<CatalogSnapshot, BoxError>;
}

/// Validated pickup details for a new order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupDetails {
    pub location: String,
    /// Unix millis
    pub time: i64,
}

/// A priced order ready to be stored
#[derive(Debug, Clone)]
pub struct NewOrder<'a> {
    pub user_id: i64,
    pub breakdown: &'a PriceBreakdown,
    pub pickup: &'a PickupDetails,
    pub created_at: i64,
}

/// Stores a new order with its line items
#[async_trait]
pub trait OrderPersistence: Send + Sync {
    /// Insert the order, its drinks and a `CREATE_ORDER` audit entry
    /// (see [`super::changes::order_created`]) atomically.
    async fn insert_order(&self, order: NewOrder<'_>) -> Result<OrderWithDrinks, BoxError>;
}

/// Everything order pricing and creation needs
pub trait OrderStore:
    ConfigProvider + OrderHistoryProvider + CatalogProvider + OrderPersistence
{
}

impl<T> OrderStore for T where
    T: ConfigProvider + OrderHistoryProvider + CatalogProvider + OrderPersistence
{
}
