//! Unit tests for collateral aggregation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::category::InventoryCategory;
use super::metrics::{
    category_totals, dollar_weighted_trend_pct, inventory_breakdown, resolve_rate_limit,
    weighted_nolv_pct,
};
use super::types::{CollateralRow, RateLimitEntry};

fn timestamp() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-06-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

fn row(sub_type: &str, eligible: Decimal, nolv: Decimal) -> CollateralRow {
    CollateralRow {
        created_at: timestamp(),
        main_type: Some("Inventory".to_string()),
        sub_type: Some(sub_type.to_string()),
        eligible_collateral: Some(eligible),
        nolv_pct: Some(nolv),
        ..CollateralRow::default()
    }
}

#[test]
fn test_weighted_nolv_is_value_weighted_not_simple_mean() {
    let a = row("Finished Goods", dec!(100), dec!(0.5));
    let b = row("Finished Goods", dec!(300), dec!(0.7));
    let rows: Vec<&CollateralRow> = vec![&a, &b];

    // (0.5*100 + 0.7*300) / 400 = 0.65, not the simple average 0.6.
    assert_eq!(weighted_nolv_pct(&rows), Some(dec!(0.65)));
}

#[test]
fn test_weighted_nolv_zero_eligible_contributes_no_weight() {
    let a = row("Finished Goods", dec!(0), dec!(0.9));
    let b = row("Finished Goods", dec!(200), dec!(0.6));
    let rows: Vec<&CollateralRow> = vec![&a, &b];
    assert_eq!(weighted_nolv_pct(&rows), Some(dec!(0.6)));
}

#[test]
fn test_weighted_nolv_none_when_no_eligible_value() {
    let a = row("Finished Goods", dec!(0), dec!(0.9));
    let rows: Vec<&CollateralRow> = vec![&a];
    assert_eq!(weighted_nolv_pct(&rows), None);
}

#[test]
fn test_trend_is_dollar_weighted() {
    let mut a = row("Finished Goods", dec!(100), dec!(0.5));
    a.beginning_collateral = Some(dec!(1000));
    a.net_collateral = Some(dec!(1100));
    let mut b = row("Finished Goods", dec!(100), dec!(0.5));
    b.beginning_collateral = Some(dec!(100));
    b.net_collateral = Some(dec!(90));
    let rows: Vec<&CollateralRow> = vec![&a, &b];

    // (100 - 10) / 1100 * 100, not the mean of +10% and -10%.
    let trend = dollar_weighted_trend_pct(&rows).unwrap().round_dp(4);
    assert_eq!(trend, dec!(8.1818));
}

#[test]
fn test_trend_none_when_no_beginning_value() {
    let a = row("Finished Goods", dec!(100), dec!(0.5));
    let rows: Vec<&CollateralRow> = vec![&a];
    assert_eq!(dollar_weighted_trend_pct(&rows), None);
}

#[test]
fn test_category_totals_buckets_and_ignores_unmatched() {
    let fg = {
        let mut r = row("Finished Goods", dec!(1000), dec!(0.68));
        r.ineligibles = Some(dec!(100));
        r.net_collateral = Some(dec!(900));
        r
    };
    let rm = {
        let mut r = row("Raw Materials", dec!(700), dec!(0.6));
        r.ineligibles = Some(dec!(50));
        r.net_collateral = Some(dec!(650));
        r
    };
    let equipment = CollateralRow {
        created_at: timestamp(),
        main_type: Some("Equipment".to_string()),
        sub_type: Some("Presses".to_string()),
        eligible_collateral: Some(dec!(5000)),
        ..CollateralRow::default()
    };
    let rows: Vec<&CollateralRow> = vec![&fg, &rm, &equipment];

    let totals = category_totals(&rows);
    assert_eq!(totals.len(), 2);
    let fg_totals = &totals[&InventoryCategory::FinishedGoods];
    assert_eq!(fg_totals.rows, 1);
    assert_eq!(fg_totals.eligible, dec!(1000));
    assert_eq!(fg_totals.ineligible, dec!(100));
    assert_eq!(fg_totals.net, dec!(900));
    assert!(!totals.contains_key(&InventoryCategory::WorkInProgress));
}

#[test]
fn test_resolve_rate_limit_prefers_sub_type_match() {
    let mut r = row("Finished Goods", dec!(100), dec!(0.5));
    r.rate_limit = Some(dec!(0.4));
    let limits = vec![
        RateLimitEntry {
            collateral_type: Some("Inventory".to_string()),
            collateral_sub_type: Some("Finished Goods".to_string()),
            pct_limit: Some(dec!(0.85)),
            ..RateLimitEntry::default()
        },
        RateLimitEntry {
            collateral_type: Some("Inventory".to_string()),
            collateral_sub_type: None,
            pct_limit: Some(dec!(0.7)),
            ..RateLimitEntry::default()
        },
    ];
    assert_eq!(resolve_rate_limit(&r, &limits), Some(dec!(0.85)));
}

#[test]
fn test_resolve_rate_limit_falls_back_to_type_level_entry() {
    let mut r = row("Widgets", dec!(100), dec!(0.5));
    r.rate_limit = Some(dec!(0.4));
    let limits = vec![RateLimitEntry {
        collateral_type: Some("inventory".to_string()),
        collateral_sub_type: None,
        pct_limit: Some(dec!(0.7)),
        ..RateLimitEntry::default()
    }];
    // Case-insensitive type match, no sub-type entry.
    assert_eq!(resolve_rate_limit(&r, &limits), Some(dec!(0.7)));
}

#[test]
fn test_resolve_rate_limit_falls_back_to_row_field() {
    let mut r = row("Finished Goods", dec!(100), dec!(0.5));
    r.rate_limit = Some(dec!(0.4));
    assert_eq!(resolve_rate_limit(&r, &[]), Some(dec!(0.4)));
}

#[test]
fn test_inventory_breakdown_signs() {
    let breakdown = inventory_breakdown(dec!(8427622), dec!(1531374));
    assert_eq!(breakdown.total, dec!(8427622));
    assert_eq!(breakdown.ineligible, dec!(-1531374));
    assert_eq!(breakdown.available, dec!(6896248));
    assert_eq!(breakdown.available, breakdown.total + breakdown.ineligible);
}
