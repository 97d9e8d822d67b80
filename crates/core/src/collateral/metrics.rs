//! Weighted collateral ratios and rate-limit resolution.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::category::{classify, InventoryCategory};
use super::types::{CollateralRow, RateLimitEntry};

/// Aggregated per-category collateral totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    /// Number of rows bucketed into the category.
    pub rows: usize,
    /// Sum of beginning collateral.
    pub beginning: Decimal,
    /// Sum of eligible collateral.
    pub eligible: Decimal,
    /// Sum of ineligible value.
    pub ineligible: Decimal,
    /// Sum of net collateral.
    pub net: Decimal,
    /// Eligible-value-weighted NOLV ratio.
    pub nolv_pct: Option<Decimal>,
    /// Dollar-weighted recovery trend, in percent.
    pub trend_pct: Option<Decimal>,
}

/// Signed inventory breakdown for display: ineligible value carries a
/// negative sign so `total + ineligible == available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryBreakdown {
    /// Total inventory value.
    pub total: Decimal,
    /// Ineligible value, negated.
    pub ineligible: Decimal,
    /// Available value.
    pub available: Decimal,
}

/// Eligible-value-weighted NOLV percentage: Σ(nolv × eligible) / Σ(eligible).
///
/// Rows with zero or missing eligible value contribute zero weight; returns
/// `None` when total eligible value is zero, avoiding division by zero.
#[must_use]
pub fn weighted_nolv_pct(rows: &[&CollateralRow]) -> Option<Decimal> {
    let mut weighted = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    for row in rows {
        let eligible = row.eligible_collateral.unwrap_or(Decimal::ZERO);
        if eligible.is_zero() {
            continue;
        }
        let nolv = row.nolv_pct.unwrap_or(Decimal::ZERO);
        weighted += nolv * eligible;
        total += eligible;
    }
    if total.is_zero() {
        None
    } else {
        Some(weighted / total)
    }
}

/// Dollar-weighted growth rate: Σ(net − beginning) / Σ(beginning) × 100.
///
/// This is not an average of per-row percentages; large rows dominate.
#[must_use]
pub fn dollar_weighted_trend_pct(rows: &[&CollateralRow]) -> Option<Decimal> {
    let mut delta = Decimal::ZERO;
    let mut beginning = Decimal::ZERO;
    for row in rows {
        let begin = row.beginning_collateral.unwrap_or(Decimal::ZERO);
        let net = row.net_collateral.unwrap_or(Decimal::ZERO);
        delta += net - begin;
        beginning += begin;
    }
    if beginning.is_zero() {
        None
    } else {
        Some(delta / beginning * Decimal::ONE_HUNDRED)
    }
}

/// Buckets snapshot rows into inventory categories and computes per-category
/// totals and weighted ratios. Unmatched rows are absent from the map.
#[must_use]
pub fn category_totals(rows: &[&CollateralRow]) -> BTreeMap<InventoryCategory, CategoryTotals> {
    let mut buckets: BTreeMap<InventoryCategory, Vec<&CollateralRow>> = BTreeMap::new();
    for row in rows {
        let category = classify(row.sub_type.as_deref(), row.main_type.as_deref());
        if let Some(category) = category {
            buckets.entry(category).or_default().push(row);
        }
    }

    buckets
        .into_iter()
        .map(|(category, members)| {
            let mut totals = CategoryTotals {
                rows: members.len(),
                ..CategoryTotals::default()
            };
            for row in &members {
                totals.beginning += row.beginning_collateral.unwrap_or(Decimal::ZERO);
                totals.eligible += row.eligible_collateral.unwrap_or(Decimal::ZERO);
                totals.ineligible += row.ineligibles.unwrap_or(Decimal::ZERO);
                totals.net += row.net_collateral.unwrap_or(Decimal::ZERO);
            }
            totals.nolv_pct = weighted_nolv_pct(&members);
            totals.trend_pct = dollar_weighted_trend_pct(&members);
            (category, totals)
        })
        .collect()
}

/// Resolves a row's effective rate limit from the borrower-level limits
/// table, matched by lowercased main type and then sub-type, falling back to
/// the row's own stored rate limit.
#[must_use]
pub fn resolve_rate_limit(row: &CollateralRow, limits: &[RateLimitEntry]) -> Option<Decimal> {
    let lower = |value: &Option<String>| value.as_deref().map(str::to_lowercase);
    let row_type = lower(&row.main_type);
    let row_sub = lower(&row.sub_type);

    let type_matches: Vec<&RateLimitEntry> = limits
        .iter()
        .filter(|entry| lower(&entry.collateral_type) == row_type && row_type.is_some())
        .collect();

    // Prefer an exact sub-type match, then a type-level entry without one.
    let exact = type_matches
        .iter()
        .find(|entry| lower(&entry.collateral_sub_type) == row_sub && row_sub.is_some());
    if let Some(entry) = exact {
        return entry.pct_limit.or(row.rate_limit);
    }
    let type_level = type_matches.iter().find(|entry| {
        entry
            .collateral_sub_type
            .as_deref()
            .map_or(true, str::is_empty)
    });
    if let Some(entry) = type_level {
        return entry.pct_limit.or(row.rate_limit);
    }
    row.rate_limit
}

/// Computes the signed inventory breakdown from total and ineligible values.
#[must_use]
pub fn inventory_breakdown(total: Decimal, ineligible: Decimal) -> InventoryBreakdown {
    let signed_ineligible = -ineligible.abs();
    InventoryBreakdown {
        total,
        ineligible: signed_ineligible,
        available: total + signed_ineligible,
    }
}
