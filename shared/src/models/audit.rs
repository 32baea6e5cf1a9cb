//! Audit Log Models

use serde::{Deserialize, Serialize};

/// Recorded action
///
/// Serialized (and stored) in SCREAMING_SNAKE_CASE, e.g. `UPDATE_CONFIG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    CreateFlavour,
    UpdateFlavour,
    DeleteFlavour,
    CreateTopping,
    UpdateTopping,
    DeleteTopping,
    CreateConsistency,
    UpdateConsistency,
    DeleteConsistency,
    UpdateConfig,
    CreateOrder,
    MarkOrderPaid,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateFlavour => "CREATE_FLAVOUR",
            Self::UpdateFlavour => "UPDATE_FLAVOUR",
            Self::DeleteFlavour => "DELETE_FLAVOUR",
            Self::CreateTopping => "CREATE_TOPPING",
            Self::UpdateTopping => "UPDATE_TOPPING",
            Self::DeleteTopping => "DELETE_TOPPING",
            Self::CreateConsistency => "CREATE_CONSISTENCY",
            Self::UpdateConsistency => "UPDATE_CONSISTENCY",
            Self::DeleteConsistency => "DELETE_CONSISTENCY",
            Self::UpdateConfig => "UPDATE_CONFIG",
            Self::CreateOrder => "CREATE_ORDER",
            Self::MarkOrderPaid => "MARK_ORDER_PAID",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-level change to record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditChange {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl AuditChange {
    pub fn new(
        field: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            field: field.into(),
            old_value,
            new_value,
        }
    }
}

/// Audit row joined with its actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AuditLogEntry {
    pub id: i64,
    pub user_id: i64,
    pub user_firstname: String,
    pub user_email: String,
    pub user_role: String,
    pub action: String,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_at: i64,
}

/// Audit log filters (inclusive date bounds)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLogQuery {
    pub action: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
}
