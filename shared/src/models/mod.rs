//! Domain models for the milkshake shop
//!
//! Row types derive `sqlx::FromRow` behind the `db` feature so clients can
//! use the same types without pulling in sqlx.

pub mod audit;
pub mod catalog;
pub mod config;
pub mod order;
pub mod report;
pub mod user;

pub use audit::{AuditAction, AuditChange, AuditLogEntry, AuditLogQuery};
pub use catalog::{CatalogItem, CatalogItemCreate, CatalogItemUpdate, CatalogKind, Lookups};
pub use config::{DiscountTier, ShopConfig, ShopConfigUpdate, TIER_PERCENTAGES};
pub use order::{
    CalculateOrderRequest, CreateOrderRequest, DiscountSummary, DrinkPrice, DrinkSelection, Order,
    OrderDrink, OrderListQuery, OrderListResponse, OrderOwner, OrderWithDrinks, PriceBreakdown,
    VatSummary,
};
pub use report::{DayOfWeekReport, DayOfWeekVolume, WEEKDAY_NAMES};
pub use user::{AuthResponse, LoginRequest, Role, SignupRequest, User, UserProfile};
