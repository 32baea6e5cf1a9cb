//! Catalog Models (flavours, toppings, consistencies)
//!
//! The three menu lists share one shape: a name and a fee.

use serde::{Deserialize, Serialize};

use super::audit::AuditAction;
use super::config::ShopConfig;
use crate::error::ErrorCode;

/// Which catalog list an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Flavour,
    Topping,
    Consistency,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [
        CatalogKind::Flavour,
        CatalogKind::Topping,
        CatalogKind::Consistency,
    ];

    /// Parse the plural path segment (`flavours`, `toppings`, `consistencies`)
    pub fn from_table(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.table() == value)
    }

    /// Database table holding this kind
    pub fn table(&self) -> &'static str {
        match self {
            CatalogKind::Flavour => "flavours",
            CatalogKind::Topping => "toppings",
            CatalogKind::Consistency => "consistencies",
        }
    }

    /// Display label, also used as the audit `field` for create/delete
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Flavour => "Flavour",
            CatalogKind::Topping => "Topping",
            CatalogKind::Consistency => "Consistency",
        }
    }

    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            CatalogKind::Flavour => ErrorCode::FlavourNotFound,
            CatalogKind::Topping => ErrorCode::ToppingNotFound,
            CatalogKind::Consistency => ErrorCode::ConsistencyNotFound,
        }
    }

    pub fn create_action(&self) -> AuditAction {
        match self {
            CatalogKind::Flavour => AuditAction::CreateFlavour,
            CatalogKind::Topping => AuditAction::CreateTopping,
            CatalogKind::Consistency => AuditAction::CreateConsistency,
        }
    }

    pub fn update_action(&self) -> AuditAction {
        match self {
            CatalogKind::Flavour => AuditAction::UpdateFlavour,
            CatalogKind::Topping => AuditAction::UpdateTopping,
            CatalogKind::Consistency => AuditAction::UpdateConsistency,
        }
    }

    pub fn delete_action(&self) -> AuditAction {
        match self {
            CatalogKind::Flavour => AuditAction::DeleteFlavour,
            CatalogKind::Topping => AuditAction::DeleteTopping,
            CatalogKind::Consistency => AuditAction::DeleteConsistency,
        }
    }
}

/// Flavour, topping or consistency row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub fee: f64,
}

impl CatalogItem {
    /// "Strawberry (R25.00)", the form audit entries use
    pub fn describe(&self) -> String {
        format!("{} (R{:.2})", self.name, self.fee)
    }
}

/// Create catalog item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItemCreate {
    pub name: Option<String>,
    pub fee: Option<f64>,
}

/// Update catalog item payload (absent fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItemUpdate {
    pub name: Option<String>,
    pub fee: Option<f64>,
}

/// Everything the order form needs in one response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lookups {
    pub flavours: Vec<CatalogItem>,
    pub toppings: Vec<CatalogItem>,
    pub consistencies: Vec<CatalogItem>,
    pub config: Option<ShopConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_table() {
        assert_eq!(CatalogKind::from_table("toppings"), Some(CatalogKind::Topping));
        assert_eq!(
            CatalogKind::from_table("consistencies"),
            Some(CatalogKind::Consistency)
        );
        assert_eq!(CatalogKind::from_table("flavour"), None);
    }

    #[test]
    fn test_describe_uses_two_decimals() {
        let item = CatalogItem {
            id: 1,
            name: "Bar One".into(),
            fee: 35.0,
        };
        assert_eq!(item.describe(), "Bar One (R35.00)");
    }
}
