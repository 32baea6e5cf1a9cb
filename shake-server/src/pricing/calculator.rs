//! Order Price Calculator
//!
//! Per-drink price is the sum of the three fees. The loyalty tier comes
//! from the user's paid order history; the highest qualifying tier wins and
//! tiers never stack. The discount is capped, then VAT is charged on the
//! discounted subtotal.
//!
//! Sums are kept unrounded until output. The discount and VAT are rounded to
//! cents before the total is formed, so `total = subtotal - discount + vat`
//! holds exactly on the returned figures. VAT is charged on the unrounded
//! `subtotal - discount`.
//!
//! Fees and the discount cap must lie in `[0, MAX_FEE]` and all arithmetic is
//! checked; out-of-range data is an error, never a zero.

use rust_decimal::prelude::*;
use shared::models::{
    CatalogKind, DiscountSummary, DrinkPrice, DrinkSelection, PriceBreakdown,
    ShopConfig, VatSummary,
};

use super::money::{
    MAX_DISCOUNT_AMOUNT, MAX_FEE, bounded_decimal, percent_of, round_money, to_f64,
};
use super::{CatalogSnapshot, PaidOrder, PricingError};

/// Winning loyalty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierOutcome {
    /// 0 when no tier applies
    pub level: u8,
    pub percentage: i32,
    /// Qualifying-order count of the winning tier (tier 1's count when none)
    pub qualifying_orders: usize,
}

/// Pick the highest tier the history satisfies.
///
/// An order qualifies for a tier when its drink count reaches the tier's
/// `min_drinks`; the tier is met when the number of qualifying orders reaches
/// `min_orders`. Both comparisons are inclusive.
pub fn evaluate_tier(config: &ShopConfig, history: &[PaidOrder]) -> TierOutcome {
    let tiers = config.tiers();
    let counts = tiers.map(|tier| {
        history
            .iter()
            .filter(|order| order.drink_count >= i64::from(tier.min_drinks))
            .count()
    });

    for (tier, count) in tiers.iter().zip(counts).rev() {
        if count as i64 >= i64::from(tier.min_orders) {
            return TierOutcome {
                level: tier.level,
                percentage: tier.percentage,
                qualifying_orders: count,
            };
        }
    }

    TierOutcome {
        level: 0,
        percentage: 0,
        qualifying_orders: counts[0],
    }
}

/// Price a list of drinks for a user with the given paid history.
///
/// Rejects empty orders and orders over the drink limit before resolving
/// any catalog ids.
pub fn price_order(
    config: &ShopConfig,
    catalog: &CatalogSnapshot,
    history: &[PaidOrder],
    drinks: &[DrinkSelection],
) -> Result<PriceBreakdown, PricingError> {
    if drinks.is_empty() {
        return Err(PricingError::EmptyOrder);
    }
    if drinks.len() as i64 > i64::from(config.max_drinks) {
        return Err(PricingError::DrinkLimitExceeded {
            max: config.max_drinks,
            requested: drinks.len(),
        });
    }

    let out_of_range = |field: &str| PricingError::AmountOutOfRange {
        field: field.to_string(),
    };

    let mut priced = Vec::with_capacity(drinks.len());
    let mut subtotal = Decimal::ZERO;

    for (drink_index, selection) in drinks.iter().enumerate() {
        let resolve = |kind: CatalogKind, id: i64| {
            catalog.get(kind, id).ok_or(PricingError::InvalidSelection {
                drink_index,
                kind,
                id,
            })
        };
        let flavour = resolve(CatalogKind::Flavour, selection.flavour_id)?;
        let topping = resolve(CatalogKind::Topping, selection.topping_id)?;
        let consistency = resolve(CatalogKind::Consistency, selection.consistency_id)?;

        let price = [flavour, topping, consistency]
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, item| {
                let fee = bounded_decimal(item.fee, MAX_FEE)
                    .ok_or_else(|| out_of_range(&format!("{} fee", item.name)))?;
                acc.checked_add(fee).ok_or_else(|| out_of_range("drink price"))
            })?;
        subtotal = subtotal
            .checked_add(price)
            .ok_or_else(|| out_of_range("subtotal"))?;

        priced.push(DrinkPrice {
            flavour_id: flavour.id,
            flavour_name: flavour.name.clone(),
            topping_id: topping.id,
            topping_name: topping.name.clone(),
            consistency_id: consistency.id,
            consistency_name: consistency.name.clone(),
            price: to_f64(price),
        });
    }

    let tier = evaluate_tier(config, history);

    let cap = bounded_decimal(config.max_discount_amount, MAX_DISCOUNT_AMOUNT)
        .ok_or_else(|| out_of_range("max_discount_amount"))?;
    let vat_percentage = bounded_decimal(config.vat_percentage, 100.0)
        .ok_or_else(|| out_of_range("vat_percentage"))?;

    // Clamp to [0, cap]
    let discount = percent_of(subtotal, Decimal::from(tier.percentage))
        .ok_or_else(|| out_of_range("discount"))?;
    let discount = round_money(discount.max(Decimal::ZERO).min(cap));

    let subtotal_after_discount = subtotal
        .checked_sub(discount)
        .ok_or_else(|| out_of_range("subtotal_after_discount"))?;
    let vat = percent_of(subtotal_after_discount, vat_percentage)
        .ok_or_else(|| out_of_range("vat"))?;
    let vat = round_money(vat);
    let total = subtotal_after_discount
        .checked_add(vat)
        .ok_or_else(|| out_of_range("total_amount"))?;

    Ok(PriceBreakdown {
        drinks: priced,
        subtotal: to_f64(subtotal),
        discount: DiscountSummary {
            percentage: tier.percentage,
            amount: to_f64(discount),
            tier: tier.level,
            qualifying_orders: tier.qualifying_orders,
        },
        subtotal_after_discount: to_f64(subtotal_after_discount),
        vat: VatSummary {
            percentage: config.vat_percentage,
            amount: to_f64(vat),
        },
        total_amount: to_f64(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::money::to_decimal;
    use shared::models::CatalogItem;

    fn item(id: i64, name: &str, fee: f64) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            fee,
        }
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![
                item(1, "Strawberry", 25.0),
                item(2, "Coffee", 30.0),
                item(3, "Vanilla", 0.0),
                item(4, "Premium", 100.0),
            ],
            vec![item(1, "Frozen Strawberries", 10.0), item(2, "None", 0.0)],
            vec![item(1, "Double Thick", 15.0), item(2, "Plain", 0.0)],
        )
    }

    fn drink(flavour_id: i64, topping_id: i64, consistency_id: i64) -> DrinkSelection {
        DrinkSelection {
            flavour_id,
            topping_id,
            consistency_id,
        }
    }

    fn history(drink_counts: &[i64]) -> Vec<PaidOrder> {
        drink_counts
            .iter()
            .enumerate()
            .map(|(i, &drink_count)| PaidOrder {
                order_id: i as i64 + 1,
                drink_count,
            })
            .collect()
    }

    fn assert_total_identity(b: &PriceBreakdown) {
        let lhs = to_decimal(b.subtotal) - to_decimal(b.discount.amount) + to_decimal(b.vat.amount);
        assert_eq!(round_money(lhs), round_money(to_decimal(b.total_amount)));
    }

    #[test]
    fn test_single_drink_no_discount() {
        let config = ShopConfig::default();
        let b = price_order(&config, &catalog(), &[], &[drink(1, 1, 1)]).unwrap();

        assert_eq!(b.drinks.len(), 1);
        assert_eq!(b.drinks[0].price, 50.0);
        assert_eq!(b.drinks[0].flavour_name, "Strawberry");
        assert_eq!(b.subtotal, 50.0);
        assert_eq!(b.discount.percentage, 0);
        assert_eq!(b.discount.tier, 0);
        assert_eq!(b.discount.amount, 0.0);
        assert_eq!(b.vat.amount, 7.5);
        assert_eq!(b.total_amount, 57.5);
        assert_total_identity(&b);
    }

    #[test]
    fn test_two_drinks_priced_thirty() {
        let config = ShopConfig::default();
        let b = price_order(&config, &catalog(), &[], &[drink(2, 2, 2), drink(2, 2, 2)]).unwrap();

        assert_eq!(b.subtotal, 60.0);
        assert_eq!(b.discount.percentage, 0);
        assert_eq!(b.vat.amount, 9.0);
        assert_eq!(b.total_amount, 69.0);
        assert_total_identity(&b);
    }

    #[test]
    fn test_discount_capped_at_max() {
        // Tier 3 with default thresholds: 10 orders of 4+ drinks
        let config = ShopConfig {
            max_discount_amount: 20.0,
            ..ShopConfig::default()
        };
        let paid = history(&[4; 10]);
        let drinks = [drink(4, 2, 2), drink(4, 2, 2)];
        let b = price_order(&config, &catalog(), &paid, &drinks).unwrap();

        assert_eq!(b.subtotal, 200.0);
        assert_eq!(b.discount.percentage, 15);
        assert_eq!(b.discount.tier, 3);
        assert_eq!(b.discount.amount, 20.0);
        assert_eq!(b.subtotal_after_discount, 180.0);
        assert_eq!(b.vat.amount, 27.0);
        assert_eq!(b.total_amount, 207.0);
        assert_total_identity(&b);
    }

    #[test]
    fn test_no_history_no_discount() {
        let config = ShopConfig::default();
        let outcome = evaluate_tier(&config, &[]);
        assert_eq!(outcome.percentage, 0);
        assert_eq!(outcome.level, 0);
        assert_eq!(outcome.qualifying_orders, 0);
    }

    #[test]
    fn test_tier_boundary_is_inclusive() {
        let config = ShopConfig::default();

        // Exactly 3 orders with exactly 2 drinks: tier 1
        let outcome = evaluate_tier(&config, &history(&[2, 2, 2]));
        assert_eq!(outcome.level, 1);
        assert_eq!(outcome.percentage, 5);
        assert_eq!(outcome.qualifying_orders, 3);

        // One short of the drink threshold does not count
        let outcome = evaluate_tier(&config, &history(&[2, 2, 1]));
        assert_eq!(outcome.level, 0);
        assert_eq!(outcome.qualifying_orders, 2);
    }

    #[test]
    fn test_highest_tier_wins() {
        let config = ShopConfig::default();

        // Qualifies for tiers 1, 2 and 3; only 15% applies
        let outcome = evaluate_tier(&config, &history(&[5; 12]));
        assert_eq!(outcome.level, 3);
        assert_eq!(outcome.percentage, 15);
        assert_eq!(outcome.qualifying_orders, 12);

        // 5 orders of 3 drinks: tier 2 (tier 3 needs 4-drink orders)
        let outcome = evaluate_tier(&config, &history(&[3, 3, 3, 3, 3, 1]));
        assert_eq!(outcome.level, 2);
        assert_eq!(outcome.percentage, 10);
        assert_eq!(outcome.qualifying_orders, 5);
    }

    #[test]
    fn test_tier_discount_applied() {
        let config = ShopConfig::default();
        let b = price_order(&config, &catalog(), &history(&[2, 2, 2]), &[drink(1, 1, 1)]).unwrap();

        assert_eq!(b.discount.percentage, 5);
        assert_eq!(b.discount.amount, 2.5);
        assert_eq!(b.subtotal_after_discount, 47.5);
        // 47.50 * 15% = 7.125 -> 7.13
        assert_eq!(b.vat.amount, 7.13);
        assert_eq!(b.total_amount, 54.63);
        assert_total_identity(&b);
    }

    #[test]
    fn test_empty_order_rejected() {
        let err = price_order(&ShopConfig::default(), &catalog(), &[], &[]).unwrap_err();
        assert_eq!(err, PricingError::EmptyOrder);
    }

    #[test]
    fn test_drink_limit_checked_before_catalog() {
        let config = ShopConfig {
            max_drinks: 2,
            ..ShopConfig::default()
        };
        // Unknown ids would fail resolution, but the limit is checked first
        let drinks = [drink(99, 99, 99); 3];
        let err = price_order(&config, &catalog(), &[], &drinks).unwrap_err();
        assert_eq!(
            err,
            PricingError::DrinkLimitExceeded {
                max: 2,
                requested: 3
            }
        );

        // Exactly at the limit is fine
        assert!(price_order(&config, &catalog(), &[], &[drink(1, 1, 1); 2]).is_ok());
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let err = price_order(
            &ShopConfig::default(),
            &catalog(),
            &[],
            &[drink(1, 1, 1), drink(1, 7, 1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidSelection {
                drink_index: 1,
                kind: CatalogKind::Topping,
                id: 7
            }
        );
    }

    #[test]
    fn test_fractional_fees_round_only_at_output() {
        let snapshot = CatalogSnapshot::new(
            vec![item(1, "A", 10.333)],
            vec![item(1, "B", 0.0)],
            vec![item(1, "C", 0.0)],
        );
        // 3 x 10.333 = 30.999 -> 31.00 (per-drink rounding would give 30.99)
        let b = price_order(&ShopConfig::default(), &snapshot, &[], &[drink(1, 1, 1); 3]).unwrap();
        assert_eq!(b.drinks[0].price, 10.33);
        assert_eq!(b.subtotal, 31.0);
        assert_total_identity(&b);
    }

    #[test]
    fn test_vat_charged_on_unrounded_discounted_subtotal() {
        let snapshot = CatalogSnapshot::new(
            vec![item(1, "A", 10.034)],
            vec![item(1, "B", 0.0)],
            vec![item(1, "C", 0.0)],
        );
        // 10.034 * 15% = 1.5051 -> 1.51 (10.03 * 15% would give 1.50)
        let b = price_order(&ShopConfig::default(), &snapshot, &[], &[drink(1, 1, 1)]).unwrap();
        assert_eq!(b.subtotal, 10.03);
        assert_eq!(b.subtotal_after_discount, 10.03);
        assert_eq!(b.vat.amount, 1.51);
        assert_eq!(b.total_amount, 11.54);
        assert_total_identity(&b);
    }

    #[test]
    fn test_fee_out_of_range_rejected() {
        let priced_with = |fee: f64| {
            let snapshot = CatalogSnapshot::new(
                vec![item(1, "Gold", fee)],
                vec![item(1, "None", 0.0)],
                vec![item(1, "Plain", 0.0)],
            );
            price_order(&ShopConfig::default(), &snapshot, &[], &[drink(1, 1, 1); 2])
        };

        let gold_fee = PricingError::AmountOutOfRange {
            field: "Gold fee".into(),
        };
        // Beyond what Decimal can hold: an error, never a free drink
        assert_eq!(priced_with(1e29).unwrap_err(), gold_fee);
        // Two of these would overflow the subtotal
        assert_eq!(priced_with(5e28).unwrap_err(), gold_fee);
        assert_eq!(priced_with(MAX_FEE + 0.01).unwrap_err(), gold_fee);
        assert_eq!(priced_with(-1.0).unwrap_err(), gold_fee);
        assert_eq!(priced_with(f64::NAN).unwrap_err(), gold_fee);

        let b = priced_with(MAX_FEE).unwrap();
        assert_eq!(b.subtotal, 2_000_000.0);
        assert_eq!(b.total_amount, 2_300_000.0);
    }

    #[test]
    fn test_config_out_of_range_rejected() {
        let config = ShopConfig {
            max_discount_amount: 1e29,
            ..ShopConfig::default()
        };
        let err = price_order(&config, &catalog(), &[], &[drink(1, 1, 1)]).unwrap_err();
        assert_eq!(
            err,
            PricingError::AmountOutOfRange {
                field: "max_discount_amount".into()
            }
        );

        let config = ShopConfig {
            vat_percentage: f64::INFINITY,
            ..ShopConfig::default()
        };
        let err = price_order(&config, &catalog(), &[], &[drink(1, 1, 1)]).unwrap_err();
        assert_eq!(
            err,
            PricingError::AmountOutOfRange {
                field: "vat_percentage".into()
            }
        );
    }

    #[test]
    fn test_breakdown_invariants_across_inputs() {
        let fees = [0.0, 0.005, 10.034, 33.33, MAX_FEE];
        let items = |prefix: &str| {
            fees.iter()
                .enumerate()
                .map(|(i, &fee)| item(i as i64 + 1, &format!("{prefix}{i}"), fee))
                .collect::<Vec<_>>()
        };
        let snapshot = CatalogSnapshot::new(items("F"), items("T"), items("C"));
        let n = fees.len() as i64;

        let caps = [0.0, 5.0, 20.0, MAX_DISCOUNT_AMOUNT];
        let histories = [
            history(&[]),
            history(&[2, 2, 2]),
            history(&[3; 5]),
            history(&[4; 10]),
        ];

        for cap in caps {
            let config = ShopConfig {
                max_discount_amount: cap,
                ..ShopConfig::default()
            };
            for paid in &histories {
                for f in 0..n {
                    for t in 0..n {
                        for c in 0..n {
                            for count in 1..=i64::from(config.max_drinks) {
                                let id = |start: i64, step: i64| (start + step) % n + 1;
                                let drinks: Vec<_> = (0..count)
                                    .map(|i| drink(id(f, i), id(t, 2 * i), id(c, 3 * i)))
                                    .collect();
                                let b = price_order(&config, &snapshot, paid, &drinks).unwrap();
                                let case =
                                    format!("cap={cap} history={} drinks={drinks:?}", paid.len());

                                assert_eq!(b.drinks.len(), drinks.len(), "{case}");
                                assert!(b.discount.amount >= 0.0, "{case}");
                                assert!(b.discount.amount <= cap, "{case}");
                                assert!(b.discount.amount <= b.subtotal, "{case}");
                                assert!(b.vat.amount >= 0.0, "{case}");
                                assert_eq!(
                                    round_money(
                                        to_decimal(b.subtotal) - to_decimal(b.discount.amount)
                                    ),
                                    round_money(to_decimal(b.subtotal_after_discount)),
                                    "{case}"
                                );
                                assert_total_identity(&b);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_inputs_same_output() {
        let config = ShopConfig::default();
        let paid = history(&[3, 3, 3, 3, 3]);
        let drinks = [drink(1, 1, 1), drink(2, 1, 2)];
        let a = price_order(&config, &catalog(), &paid, &drinks).unwrap();
        let b = price_order(&config, &catalog(), &paid, &drinks).unwrap();
        assert_eq!(a, b);
    }
}
