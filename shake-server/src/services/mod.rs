//! Service layer: order pricing/creation and audit entry builders

pub mod changes;
pub mod order_service;
pub mod providers;

pub use order_service::OrderError;
pub use providers::{
    CatalogProvider, ConfigProvider, NewOrder, OrderHistoryProvider, OrderPersistence, OrderStore,
    PickupDetails,
};
