//! Pricing Module
//!
//! Pure order pricing: per-drink fees, loyalty tier discount, VAT.
//! Nothing here touches the database; callers pass in snapshots.

pub mod calculator;
pub mod money;

use std::collections::HashMap;

use shared::error::{AppError, ErrorCode};
use shared::models::{CatalogItem, CatalogKind};
use thiserror::Error;

pub use calculator::{TierOutcome, evaluate_tier, price_order};

/// One previously paid order, reduced to what tier evaluation needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaidOrder {
    pub order_id: i64,
    pub drink_count: i64,
}

/// Catalog lookup tables keyed by id
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    flavours: HashMap<i64, CatalogItem>,
    toppings: HashMap<i64, CatalogItem>,
    consistencies: HashMap<i64, CatalogItem>,
}

impl CatalogSnapshot {
    pub fn new(
        flavours: Vec<CatalogItem>,
        toppings: Vec<CatalogItem>,
        consistencies: Vec<CatalogItem>,
    ) -> Self {
        let index = |items: Vec<CatalogItem>| items.into_iter().map(|i| (i.id, i)).collect();
        Self {
            flavours: index(flavours),
            toppings: index(toppings),
            consistencies: index(consistencies),
        }
    }

    pub fn get(&self, kind: CatalogKind, id: i64) -> Option<&CatalogItem> {
        match kind {
            CatalogKind::Flavour => self.flavours.get(&id),
            CatalogKind::Topping => self.toppings.get(&id),
            CatalogKind::Consistency => self.consistencies.get(&id),
        }
    }
}

/// Pricing rejection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Order must contain at least one drink")]
    EmptyOrder,

    #[error("Maximum {max} drinks allowed per order, got {requested}")]
    DrinkLimitExceeded { max: i32, requested: usize },

    #[error("Drink {} references unknown {} {id}", .drink_index + 1, .kind.label().to_lowercase())]
    InvalidSelection {
        drink_index: usize,
        kind: CatalogKind,
        id: i64,
    },

    #[error("{field} is outside the supported range")]
    AmountOutOfRange { field: String },
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let message = err.to_string();
        match err {
            PricingError::EmptyOrder => AppError::with_message(ErrorCode::OrderEmpty, message),
            PricingError::DrinkLimitExceeded { max, requested } => {
                AppError::with_message(ErrorCode::DrinkLimitExceeded, message)
                    .with_detail("max_drinks", max)
                    .with_detail("requested", requested)
            }
            PricingError::InvalidSelection {
                drink_index,
                kind,
                id,
            } => AppError::with_message(ErrorCode::InvalidDrinkSelection, message)
                .with_detail("drink_index", drink_index)
                .with_detail("kind", kind.label())
                .with_detail("id", id),
            PricingError::AmountOutOfRange { field } => {
                AppError::with_message(ErrorCode::PricingDataUnavailable, message)
                    .with_detail("field", field)
            }
        }
    }
}
