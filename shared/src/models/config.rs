//! Shop Configuration Model
//!
//! Singleton row governing drink limits, VAT and loyalty tiers.

use serde::{Deserialize, Serialize};

/// Loyalty tier thresholds
///
/// A past paid order qualifies when its drink count reaches `min_drinks`;
/// the tier is awarded when at least `min_orders` orders qualify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// 1, 2 or 3
    pub level: u8,
    pub min_orders: i32,
    pub min_drinks: i32,
    /// Fixed percentage awarded by this tier
    pub percentage: i32,
}

/// Percentage awarded per tier level (index 0 = tier 1)
pub const TIER_PERCENTAGES: [i32; 3] = [5, 10, 15];

/// Shop configuration (id is always 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShopConfig {
    pub max_drinks: i32,
    pub vat_percentage: f64,
    pub discount_tier1_min_orders: i32,
    pub discount_tier1_min_drinks: i32,
    pub discount_tier2_min_orders: i32,
    pub discount_tier2_min_drinks: i32,
    pub discount_tier3_min_orders: i32,
    pub discount_tier3_min_drinks: i32,
    pub max_discount_amount: f64,
    pub updated_at: i64,
}

impl ShopConfig {
    /// Tiers ordered from lowest (1) to highest (3)
    pub fn tiers(&self) -> [DiscountTier; 3] {
        [
            DiscountTier {
                level: 1,
                min_orders: self.discount_tier1_min_orders,
                min_drinks: self.discount_tier1_min_drinks,
                percentage: TIER_PERCENTAGES[0],
            },
            DiscountTier {
                level: 2,
                min_orders: self.discount_tier2_min_orders,
                min_drinks: self.discount_tier2_min_drinks,
                percentage: TIER_PERCENTAGES[1],
            },
            DiscountTier {
                level: 3,
                min_orders: self.discount_tier3_min_orders,
                min_drinks: self.discount_tier3_min_drinks,
                percentage: TIER_PERCENTAGES[2],
            },
        ]
    }
}

impl Default for ShopConfig {
    /// Values seeded by the initial migration
    fn default() -> Self {
        Self {
            max_drinks: 10,
            vat_percentage: 15.0,
            discount_tier1_min_orders: 3,
            discount_tier1_min_drinks: 2,
            discount_tier2_min_orders: 5,
            discount_tier2_min_drinks: 3,
            discount_tier3_min_orders: 10,
            discount_tier3_min_drinks: 4,
            max_discount_amount: 50.0,
            updated_at: 0,
        }
    }
}

/// Partial config update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfigUpdate {
    pub max_drinks: Option<i32>,
    pub vat_percentage: Option<f64>,
    pub discount_tier1_min_orders: Option<i32>,
    pub discount_tier1_min_drinks: Option<i32>,
    pub discount_tier2_min_orders: Option<i32>,
    pub discount_tier2_min_drinks: Option<i32>,
    pub discount_tier3_min_orders: Option<i32>,
    pub discount_tier3_min_drinks: Option<i32>,
    pub max_discount_amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_follow_columns() {
        let config = ShopConfig::default();
        let tiers = config.tiers();
        assert_eq!(tiers[0].level, 1);
        assert_eq!((tiers[0].min_orders, tiers[0].min_drinks), (3, 2));
        assert_eq!((tiers[1].min_orders, tiers[1].min_drinks), (5, 3));
        assert_eq!((tiers[2].min_orders, tiers[2].min_drinks), (10, 4));
        assert_eq!(
            tiers.iter().map(|t| t.percentage).collect::<Vec<_>>(),
            vec![5, 10, 15]
        );
    }
}
