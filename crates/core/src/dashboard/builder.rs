//! Assembles the dashboard context from storage rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use lendview_shared::types::{
    format_currency, format_date, format_pct, safe_str, DateRangePreset,
};

use crate::chart::{
    build_axis, monthly_latest_sum, normalize_series, DatedValue, SeriesPoint, DEFAULT_SERIES_LEN,
};
use crate::collateral::{
    category_totals, inventory_breakdown, latest_snapshot, resolve_rate_limit, CollateralRow,
    InventoryCategory,
};
use crate::risk::{bar_width_pct, category_score, overall_score, RiskSubfactor};

use super::types::{
    ArSnapshot, BorrowerProfile, BorrowerSummary, ChartView, CollateralNode, CollateralRowView,
    DashboardCharts, DashboardContext, DashboardInputs, InventoryCategoryView, InventoryMixSlice,
    KpiCard, RiskBar, RiskMetricView, RiskPanel,
};

/// Y-axis tick count used by the dashboard charts.
const CHART_TICKS: usize = 5;

/// An explicit dashboard request.
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    /// Date-range preset.
    pub range: DateRangePreset,
    /// Requested division filter, free text.
    pub division: Option<String>,
    /// Reference date for the preset bounds.
    pub today: NaiveDate,
}

/// Resolves a free-text division filter against the borrower's recorded
/// divisions; anything that does not match falls back to `all`.
#[must_use]
pub fn resolve_division(requested: Option<&str>, divisions: &[String]) -> String {
    let Some(raw) = requested else {
        return "all".to_string();
    };
    let wanted = raw.trim().to_lowercase();
    if wanted.is_empty() || wanted == "all" {
        return "all".to_string();
    }
    divisions
        .iter()
        .find(|division| division.to_lowercase() == wanted)
        .cloned()
        .unwrap_or_else(|| "all".to_string())
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            for lowered in ch.to_lowercase() {
                slug.push(lowered);
            }
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}

fn website_href(website: Option<&str>) -> Option<String> {
    let site = website?.trim();
    if site.is_empty() {
        return None;
    }
    if site.starts_with("http://") || site.starts_with("https://") {
        Some(site.to_string())
    } else {
        Some(format!("https://{}", site.trim_start_matches('/')))
    }
}

fn borrower_summary(profile: &BorrowerProfile) -> BorrowerSummary {
    BorrowerSummary {
        company_name: safe_str(profile.company_name.as_deref()),
        company_id: profile
            .company_external_id
            .map_or_else(|| safe_str(None), |id| id.to_string()),
        industry: safe_str(profile.industry.as_deref()),
        primary_naics: safe_str(profile.primary_naics.as_deref()),
        website: safe_str(profile.website.as_deref()),
        website_url: website_href(profile.website.as_deref()),
        primary_contact: safe_str(profile.primary_contact.as_deref()),
        primary_contact_phone: safe_str(profile.primary_contact_phone.as_deref()),
        primary_contact_email: safe_str(profile.primary_contact_email.as_deref()),
        update_interval: safe_str(profile.update_interval.as_deref()),
        current_update: format_date(profile.current_update),
        previous_update: format_date(profile.previous_update),
        next_update: format_date(profile.next_update),
        lender: safe_str(profile.lender.as_deref()),
    }
}

fn collateral_row_view(row: &CollateralRow, rate_limit: Option<Decimal>) -> CollateralRowView {
    CollateralRowView {
        label: safe_str(row.main_type.as_deref()),
        detail: row.sub_type.clone().unwrap_or_default(),
        beginning_collateral: format_currency(row.beginning_collateral),
        ineligibles: format_currency(row.ineligibles),
        eligible_collateral: format_currency(row.eligible_collateral),
        nolv_pct: format_pct(row.nolv_pct),
        dilution_rate: format_pct(row.dilution_rate),
        advanced_rate: format_pct(row.advanced_rate),
        rate_limit: format_pct(rate_limit),
        utilized_rate: format_pct(row.utilized_rate),
        pre_reserve_collateral: format_currency(row.pre_reserve_collateral),
        reserves: format_currency(row.reserves),
        net_collateral: format_currency(row.net_collateral),
    }
}

/// Builds the two-level collateral tree: rows without a sub-type become
/// parents keyed by their main-type label, rows with one attach beneath the
/// matching parent (creating it when the workbook never listed a bare
/// parent row).
fn collateral_tree(rows: &[CollateralRowView]) -> Vec<CollateralNode> {
    let mut tree: Vec<CollateralNode> = Vec::new();

    let parent_index = |tree: &Vec<CollateralNode>, label: &str| {
        tree.iter().position(|node| node.row.label == label)
    };

    for row in rows.iter().filter(|row| row.detail.trim().is_empty()) {
        if parent_index(&tree, &row.label).is_none() {
            tree.push(CollateralNode {
                id: slugify(&row.label),
                row: row.clone(),
                children: Vec::new(),
            });
        }
    }

    for row in rows.iter().filter(|row| !row.detail.trim().is_empty()) {
        let idx = match parent_index(&tree, &row.label) {
            Some(idx) => idx,
            None => {
                tree.push(CollateralNode {
                    id: slugify(&row.label),
                    row: row.clone(),
                    children: Vec::new(),
                });
                tree.len() - 1
            }
        };
        tree[idx].children.push(CollateralNode {
            id: slugify(&format!("{}-{}", row.label, row.detail)),
            row: row.clone(),
            children: Vec::new(),
        });
    }

    tree
}

fn sum_field(
    rows: &[&CollateralRow],
    field: impl Fn(&CollateralRow) -> Option<Decimal>,
) -> Decimal {
    rows.iter()
        .map(|row| field(row).unwrap_or(Decimal::ZERO))
        .sum()
}

fn chart_view(title: &str, points: &[SeriesPoint]) -> ChartView {
    let series = normalize_series(points, DEFAULT_SERIES_LEN, Decimal::ZERO);
    let min = series.values.iter().copied().min().unwrap_or(Decimal::ZERO);
    let max = series.values.iter().copied().max().unwrap_or(Decimal::ZERO);
    ChartView {
        title: title.to_string(),
        series,
        axis: build_axis(min, max, CHART_TICKS),
    }
}

fn availability_points(net: &[SeriesPoint], outstanding: &[SeriesPoint]) -> Vec<SeriesPoint> {
    use std::collections::BTreeMap;

    let mut by_label: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for point in net {
        by_label.entry(point.label.clone()).or_default().0 = point.value;
    }
    for point in outstanding {
        by_label.entry(point.label.clone()).or_default().1 = point.value;
    }
    by_label
        .into_iter()
        .map(|(label, (net_value, balance))| SeriesPoint {
            label,
            value: net_value - balance,
        })
        .collect()
}

fn risk_bars(subfactors: &[RiskSubfactor], category: &str) -> Vec<RiskBar> {
    let wanted = category.to_lowercase();
    let mut bars: Vec<RiskBar> = Vec::new();
    for factor in subfactors {
        let matches = factor
            .main_category
            .as_deref()
            .map(str::to_lowercase)
            .is_some_and(|c| c == wanted);
        if !matches {
            continue;
        }
        let label = factor
            .sub_risk
            .clone()
            .or_else(|| factor.high_impact_factor.clone())
            .or_else(|| factor.main_category.clone())
            .unwrap_or_else(|| "Metric".to_string());
        if bars.iter().any(|bar| bar.label == label) {
            continue;
        }
        bars.push(RiskBar {
            width_pct: bar_width_pct(factor.risk_score.unwrap_or(Decimal::ZERO)),
            label,
        });
    }
    bars
}

fn risk_panel(inputs: &DashboardInputs, ineligible_pct: Option<Decimal>) -> RiskPanel {
    let overall = overall_score(&inputs.composite, ineligible_pct);
    let rating = overall.map_or_else(|| safe_str(None), |score| format!("{:.1}", score.round_dp(1)));
    let rating_pct = overall.map_or(Decimal::ZERO, bar_width_pct);

    let definitions = [
        ("Accounts Receivable", inputs.composite.ar),
        ("Inventory", inputs.composite.inventory),
        ("Company", inputs.composite.company),
        ("Industry", inputs.composite.industry),
    ];

    let metrics = definitions
        .into_iter()
        .map(|(label, fallback)| {
            let score = category_score(&inputs.subfactors, label).unwrap_or(fallback);
            RiskMetricView {
                label: label.to_string(),
                score: format!("{:.1}", score.round_dp(1)),
                bars: risk_bars(&inputs.subfactors, label),
            }
        })
        .collect();

    RiskPanel {
        rating,
        rating_pct,
        metrics,
    }
}

/// Builds the dashboard context for one borrower.
#[must_use]
pub fn build_dashboard(inputs: &DashboardInputs, request: &DashboardRequest) -> DashboardContext {
    let (start, end) = request.range.bounds(request.today);
    let division = resolve_division(request.division.as_deref(), &inputs.divisions);

    let snapshot = latest_snapshot(&inputs.collateral, Some(start), Some(end));

    let ar_rows: Vec<&ArSnapshot> = inputs
        .ar
        .iter()
        .filter(|row| {
            division == "all"
                || row
                    .division
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase() == division.to_lowercase())
        })
        .collect();
    let ar_latest = ar_rows
        .iter()
        .max_by_key(|row| (row.as_of_date, row.created_at))
        .copied();

    let collateral_rows: Vec<CollateralRowView> = snapshot
        .iter()
        .map(|row| collateral_row_view(row, resolve_rate_limit(row, &inputs.limits)))
        .collect();
    let tree = collateral_tree(&collateral_rows);

    let net_total = sum_field(&snapshot, |row| row.net_collateral);
    let eligible_total = sum_field(&snapshot, |row| row.eligible_collateral);
    let ineligibles_total = sum_field(&snapshot, |row| row.ineligibles);
    let available_total = (eligible_total - ineligibles_total).max(Decimal::ZERO);

    let net_card = KpiCard {
        amount: format_currency((!snapshot.is_empty()).then_some(net_total)),
        detail: format!(
            "Ineligibles {} across {} rows",
            format_currency((!snapshot.is_empty()).then_some(ineligibles_total)),
            snapshot.len()
        ),
    };
    let outstanding_card = KpiCard {
        amount: format_currency(ar_latest.and_then(|row| row.balance)),
        detail: ar_latest.and_then(|row| row.as_of_date).map_or_else(
            || "Awaiting AR snapshot".to_string(),
            |date| format!("As of {}", format_date(Some(date))),
        ),
    };
    let availability_card = KpiCard {
        amount: format_currency((!snapshot.is_empty()).then_some(available_total)),
        detail: format!("{} collateral entries", snapshot.len()),
    };

    // Inventory mix and per-category breakdown from the bucketed snapshot.
    let totals = category_totals(&snapshot);
    let mix_base: Decimal = totals.values().map(|t| t.eligible).sum();
    let mut inventory_mix = Vec::new();
    let mut breakdown = Vec::new();
    for category in InventoryCategory::ALL {
        let Some(per_category) = totals.get(&category) else {
            continue;
        };
        let share = if mix_base.is_zero() {
            Decimal::ZERO
        } else {
            (per_category.eligible / mix_base * Decimal::ONE_HUNDRED).round_dp(1)
        };
        inventory_mix.push(InventoryMixSlice {
            label: category.label().to_string(),
            share_pct: share,
            amount: format_currency(Some(per_category.eligible)),
        });

        let signed =
            inventory_breakdown(per_category.eligible + per_category.ineligible, per_category.ineligible);
        breakdown.push(InventoryCategoryView {
            key: category.key().to_string(),
            label: category.label().to_string(),
            total: format_currency(Some(signed.total)),
            ineligible: format_currency(Some(signed.ineligible)),
            available: format_currency(Some(signed.available)),
            nolv_pct: format_pct(per_category.nolv_pct),
            trend_pct: per_category
                .trend_pct
                .map_or_else(|| safe_str(None), |trend| format!("{:.1}%", trend.round_dp(1))),
        });
    }

    // Ineligible ratio across inventory-typed rows feeds the risk profile.
    let inventory_rows: Vec<&CollateralRow> = snapshot
        .iter()
        .filter(|row| {
            row.main_type
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains("inventory"))
        })
        .copied()
        .collect();
    let inventory_eligible = sum_field(&inventory_rows, |row| row.eligible_collateral);
    let inventory_ineligible = sum_field(&inventory_rows, |row| row.ineligibles);
    let inventory_base = inventory_eligible + inventory_ineligible;
    let ineligible_pct = if inventory_base.is_zero() {
        None
    } else {
        Some(inventory_ineligible / inventory_base * Decimal::ONE_HUNDRED)
    };

    let risk = risk_panel(inputs, ineligible_pct);

    // Trend charts from monthly snapshot series.
    let net_values: Vec<DatedValue> = inputs
        .collateral
        .iter()
        .map(|row| DatedValue {
            created_at: row.created_at,
            value: row.net_collateral.unwrap_or(Decimal::ZERO),
        })
        .collect();
    let balance_values: Vec<DatedValue> = ar_rows
        .iter()
        .map(|row| DatedValue {
            created_at: row.created_at,
            value: row.balance.unwrap_or(Decimal::ZERO),
        })
        .collect();

    let net_points = monthly_latest_sum(&net_values, Some(start), Some(end));
    let balance_points = monthly_latest_sum(&balance_values, Some(start), Some(end));
    let avail_points = availability_points(&net_points, &balance_points);

    let charts = DashboardCharts {
        net_collateral: chart_view("Net Collateral", &net_points),
        outstanding_balance: chart_view("Outstanding Balance", &balance_points),
        availability: chart_view("Availability", &avail_points),
    };

    DashboardContext {
        borrower: borrower_summary(&inputs.profile),
        collateral_rows,
        collateral_tree: tree,
        net: net_card,
        outstanding: outstanding_card,
        availability: availability_card,
        inventory_mix,
        inventory_breakdown: breakdown,
        risk,
        charts,
        division,
        range: request.range.as_str().to_string(),
        divisions: inputs.divisions.clone(),
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_resolve_division_falls_back_to_all() {
        let divisions = vec!["North".to_string(), "South".to_string()];
        assert_eq!(resolve_division(Some("north"), &divisions), "North");
        assert_eq!(resolve_division(Some("East"), &divisions), "all");
        assert_eq!(resolve_division(Some(""), &divisions), "all");
        assert_eq!(resolve_division(None, &divisions), "all");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Finished Goods"), "finished-goods");
        assert_eq!(slugify("Inventory-Finished Goods"), "inventory-finished-goods");
        assert_eq!(slugify("  A&B  "), "a-b");
    }

    #[test]
    fn test_website_href() {
        assert_eq!(
            website_href(Some("acme.example")).as_deref(),
            Some("https://acme.example")
        );
        assert_eq!(
            website_href(Some("http://acme.example")).as_deref(),
            Some("http://acme.example")
        );
        assert_eq!(website_href(None), None);
        assert_eq!(website_href(Some("  ")), None);
    }
}
