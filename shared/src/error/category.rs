//! Error categories, one per code range

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Which part of the service an error code belongs to
///
/// The thousands digit of the code selects the category; anything from
/// 6000 up is treated as a system error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Catalog,
    Order,
    Config,
    System,
}

impl ErrorCategory {
    pub const fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Catalog,
            4 => Self::Order,
            5 => Self::Config,
            _ => Self::System,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Catalog => "catalog",
            Self::Order => "order",
            Self::Config => "config",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
