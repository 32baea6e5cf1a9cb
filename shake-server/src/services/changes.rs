//! Audit entry builders
//!
//! Turn before/after values into the field-level entries written to
//! `audit_logs`. Only fields that actually changed produce an entry.

use shared::models::{AuditChange, CatalogItem, CatalogKind, ShopConfig};

use crate::pricing::money::format_rand;

fn fee_string(fee: f64) -> String {
    format!("{fee:.2}")
}

/// `CREATE_<KIND>`: new value is "Name (R12.00)"
pub fn catalog_created(kind: CatalogKind, item: &CatalogItem) -> AuditChange {
    AuditChange::new(kind.label(), None, Some(item.describe()))
}

/// `DELETE_<KIND>`: old value is "Name (R12.00)"
pub fn catalog_deleted(kind: CatalogKind, item: &CatalogItem) -> AuditChange {
    AuditChange::new(kind.label(), Some(item.describe()), None)
}

/// `UPDATE_<KIND>`: one entry per changed field (`name`, `fee`)
pub fn catalog_updated(before: &CatalogItem, after: &CatalogItem) -> Vec<AuditChange> {
    let mut changes = Vec::new();
    if before.name != after.name {
        changes.push(AuditChange::new(
            "name",
            Some(before.name.clone()),
            Some(after.name.clone()),
        ));
    }
    if fee_string(before.fee) != fee_string(after.fee) {
        changes.push(AuditChange::new(
            "fee",
            Some(fee_string(before.fee)),
            Some(fee_string(after.fee)),
        ));
    }
    changes
}

/// `UPDATE_CONFIG`: one entry per changed column
pub fn config_updated(before: &ShopConfig, after: &ShopConfig) -> Vec<AuditChange> {
    let fields: [(&str, String, String); 9] = [
        (
            "max_drinks",
            before.max_drinks.to_string(),
            after.max_drinks.to_string(),
        ),
        (
            "vat_percentage",
            before.vat_percentage.to_string(),
            after.vat_percentage.to_string(),
        ),
        (
            "discount_tier1_min_orders",
            before.discount_tier1_min_orders.to_string(),
            after.discount_tier1_min_orders.to_string(),
        ),
        (
            "discount_tier1_min_drinks",
            before.discount_tier1_min_drinks.to_string(),
            after.discount_tier1_min_drinks.to_string(),
        ),
        (
            "discount_tier2_min_orders",
            before.discount_tier2_min_orders.to_string(),
            after.discount_tier2_min_orders.to_string(),
        ),
        (
            "discount_tier2_min_drinks",
            before.discount_tier2_min_drinks.to_string(),
            after.discount_tier2_min_drinks.to_string(),
        ),
        (
            "discount_tier3_min_orders",
            before.discount_tier3_min_orders.to_string(),
            after.discount_tier3_min_orders.to_string(),
        ),
        (
            "discount_tier3_min_drinks",
            before.discount_tier3_min_drinks.to_string(),
            after.discount_tier3_min_drinks.to_string(),
        ),
        (
            "max_discount_amount",
            fee_string(before.max_discount_amount),
            fee_string(after.max_discount_amount),
        ),
    ];

    fields
        .into_iter()
        .filter(|(_, old, new)| old != new)
        .map(|(field, old, new)| AuditChange::new(field, Some(old), Some(new)))
        .collect()
}

/// `CREATE_ORDER`: "Order #42 - R57.50"
pub fn order_created(order_id: i64, total_amount: f64) -> AuditChange {
    AuditChange::new(
        "Order",
        None,
        Some(format!("Order #{order_id} - {}", format_rand(total_amount))),
    )
}

/// `MARK_ORDER_PAID`
pub fn order_paid(order_id: i64) -> AuditChange {
    AuditChange::new(
        format!("Order #{order_id}"),
        Some("unpaid".to_string()),
        Some("paid".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, fee: f64) -> CatalogItem {
        CatalogItem {
            id: 3,
            name: name.to_string(),
            fee,
        }
    }

    #[test]
    fn test_catalog_create_and_delete() {
        let created = catalog_created(CatalogKind::Topping, &item("Oreo Crumbs", 15.0));
        assert_eq!(created.field, "Topping");
        assert_eq!(created.old_value, None);
        assert_eq!(created.new_value.as_deref(), Some("Oreo Crumbs (R15.00)"));

        let deleted = catalog_deleted(CatalogKind::Flavour, &item("Banana", 22.5));
        assert_eq!(deleted.field, "Flavour");
        assert_eq!(deleted.old_value.as_deref(), Some("Banana (R22.50)"));
        assert_eq!(deleted.new_value, None);
    }

    #[test]
    fn test_catalog_update_only_changed_fields() {
        let before = item("Coffee", 30.0);

        assert!(catalog_updated(&before, &item("Coffee", 30.0)).is_empty());

        let changes = catalog_updated(&before, &item("Coffee", 32.0));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "fee");
        assert_eq!(changes[0].old_value.as_deref(), Some("30.00"));
        assert_eq!(changes[0].new_value.as_deref(), Some("32.00"));

        let changes = catalog_updated(&before, &item("Mocha", 31.0));
        assert_eq!(
            changes.iter().map(|c| c.field.as_str()).collect::<Vec<_>>(),
            vec!["name", "fee"]
        );
    }

    #[test]
    fn test_config_update_diff() {
        let before = ShopConfig::default();
        let after = ShopConfig {
            vat_percentage: 16.0,
            discount_tier2_min_orders: 6,
            ..before.clone()
        };
        let changes = config_updated(&before, &after);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].field, "vat_percentage");
        assert_eq!(changes[0].old_value.as_deref(), Some("15"));
        assert_eq!(changes[0].new_value.as_deref(), Some("16"));
        assert_eq!(changes[1].field, "discount_tier2_min_orders");

        // updated_at alone is not a change
        let touched = ShopConfig {
            updated_at: 99,
            ..before.clone()
        };
        assert!(config_updated(&before, &touched).is_empty());
    }

    #[test]
    fn test_order_entries() {
        let created = order_created(42, 57.5);
        assert_eq!(created.field, "Order");
        assert_eq!(created.new_value.as_deref(), Some("Order #42 - R57.50"));

        let paid = order_paid(42);
        assert_eq!(paid.field, "Order #42");
        assert_eq!(paid.new_value.as_deref(), Some("paid"));
    }
}
