//! Dashboard input and view-model types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::chart::{AxisScale, ChartSeries};
use crate::collateral::{CollateralRow, RateLimitEntry};
use crate::risk::{CompositeScores, RiskSubfactor};

/// Borrower identity as loaded from storage.
#[derive(Debug, Clone, Default)]
pub struct BorrowerProfile {
    /// Borrower id.
    pub borrower_id: i64,
    /// Owning company id.
    pub company_id: i64,
    /// Company display name.
    pub company_name: Option<String>,
    /// External numeric company id.
    pub company_external_id: Option<i64>,
    /// Industry label.
    pub industry: Option<String>,
    /// Primary NAICS classification code.
    pub primary_naics: Option<String>,
    /// Company website.
    pub website: Option<String>,
    /// Primary contact name.
    pub primary_contact: Option<String>,
    /// Primary contact phone.
    pub primary_contact_phone: Option<String>,
    /// Primary contact email.
    pub primary_contact_email: Option<String>,
    /// Update cadence label.
    pub update_interval: Option<String>,
    /// Current update checkpoint.
    pub current_update: Option<NaiveDate>,
    /// Previous update checkpoint.
    pub previous_update: Option<NaiveDate>,
    /// Next update checkpoint.
    pub next_update: Option<NaiveDate>,
    /// Lender name.
    pub lender: Option<String>,
}

/// One AR metrics row as loaded from storage.
#[derive(Debug, Clone, Default)]
pub struct ArSnapshot {
    /// Row creation timestamp.
    pub created_at: NaiveDateTime,
    /// As-of date of the metrics.
    pub as_of_date: Option<NaiveDate>,
    /// Division the row belongs to.
    pub division: Option<String>,
    /// Outstanding AR balance.
    pub balance: Option<Decimal>,
    /// Past-due share of AR.
    pub pct_past_due: Option<Decimal>,
}

/// Everything the builder needs, fetched by the storage layer.
#[derive(Debug, Clone, Default)]
pub struct DashboardInputs {
    /// Borrower identity.
    pub profile: BorrowerProfile,
    /// All collateral rows for the borrower.
    pub collateral: Vec<CollateralRow>,
    /// Borrower-level collateral limits.
    pub limits: Vec<RateLimitEntry>,
    /// AR metric rows.
    pub ar: Vec<ArSnapshot>,
    /// Risk sub-factor rows.
    pub subfactors: Vec<RiskSubfactor>,
    /// Composite scores, explicit or defaulted.
    pub composite: CompositeScores,
    /// Distinct division values recorded for the borrower.
    pub divisions: Vec<String>,
}

/// Formatted borrower identity summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BorrowerSummary {
    /// Company display name.
    pub company_name: String,
    /// External company id.
    pub company_id: String,
    /// Industry label.
    pub industry: String,
    /// Primary NAICS code.
    pub primary_naics: String,
    /// Website display text.
    pub website: String,
    /// Website href with scheme, when present.
    pub website_url: Option<String>,
    /// Primary contact name.
    pub primary_contact: String,
    /// Primary contact phone.
    pub primary_contact_phone: String,
    /// Primary contact email.
    pub primary_contact_email: String,
    /// Update cadence label.
    pub update_interval: String,
    /// Current update checkpoint.
    pub current_update: String,
    /// Previous update checkpoint.
    pub previous_update: String,
    /// Next update checkpoint.
    pub next_update: String,
    /// Lender name.
    pub lender: String,
}

/// One formatted collateral table row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollateralRowView {
    /// Main-type label.
    pub label: String,
    /// Sub-type detail, empty for parent rows.
    pub detail: String,
    /// Beginning collateral.
    pub beginning_collateral: String,
    /// Ineligible value.
    pub ineligibles: String,
    /// Eligible collateral.
    pub eligible_collateral: String,
    /// NOLV percentage.
    pub nolv_pct: String,
    /// Dilution rate.
    pub dilution_rate: String,
    /// Advanced rate.
    pub advanced_rate: String,
    /// Effective rate limit after limits-table resolution.
    pub rate_limit: String,
    /// Utilized rate.
    pub utilized_rate: String,
    /// Pre-reserve collateral.
    pub pre_reserve_collateral: String,
    /// Reserves.
    pub reserves: String,
    /// Net collateral.
    pub net_collateral: String,
}

/// Hierarchical collateral tree node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollateralNode {
    /// Slugged node id.
    pub id: String,
    /// Row payload.
    pub row: CollateralRowView,
    /// Sub-type children.
    pub children: Vec<CollateralNode>,
}

/// One headline KPI card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KpiCard {
    /// Formatted headline amount.
    pub amount: String,
    /// Supporting detail line.
    pub detail: String,
}

/// One slice of the inventory mix.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InventoryMixSlice {
    /// Category label.
    pub label: String,
    /// Share of eligible inventory value, in percent.
    pub share_pct: Decimal,
    /// Formatted eligible value.
    pub amount: String,
}

/// Per-category inventory breakdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InventoryCategoryView {
    /// Stable key ("finished_goods").
    pub key: String,
    /// Display label.
    pub label: String,
    /// Formatted total inventory value.
    pub total: String,
    /// Formatted (negative) ineligible value.
    pub ineligible: String,
    /// Formatted available value.
    pub available: String,
    /// Weighted NOLV percentage.
    pub nolv_pct: String,
    /// Dollar-weighted recovery trend.
    pub trend_pct: String,
}

/// One risk metric bar.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskBar {
    /// Sub-risk label.
    pub label: String,
    /// Bar width as a percentage of the 5-point scale.
    pub width_pct: Decimal,
}

/// One of the four risk sub-metrics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskMetricView {
    /// Category label.
    pub label: String,
    /// Score display ("3.4").
    pub score: String,
    /// Detail bars.
    pub bars: Vec<RiskBar>,
}

/// Composite risk panel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskPanel {
    /// Overall rating display.
    pub rating: String,
    /// Rating as a percentage of the 5-point scale.
    pub rating_pct: Decimal,
    /// Sub-metrics.
    pub metrics: Vec<RiskMetricView>,
}

/// One normalized chart with its axis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartView {
    /// Chart title.
    pub title: String,
    /// Normalized series.
    pub series: ChartSeries,
    /// Y-axis scale.
    pub axis: AxisScale,
}

/// The three dashboard trend charts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardCharts {
    /// Net collateral trend.
    pub net_collateral: ChartView,
    /// Outstanding AR balance trend.
    pub outstanding_balance: ChartView,
    /// Availability trend.
    pub availability: ChartView,
}

/// The assembled dashboard context.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardContext {
    /// Borrower identity summary.
    pub borrower: BorrowerSummary,
    /// Flattened collateral rows.
    pub collateral_rows: Vec<CollateralRowView>,
    /// Hierarchical collateral tree.
    pub collateral_tree: Vec<CollateralNode>,
    /// Net collateral KPI card.
    pub net: KpiCard,
    /// Outstanding balance KPI card.
    pub outstanding: KpiCard,
    /// Availability KPI card.
    pub availability: KpiCard,
    /// Inventory mix slices.
    pub inventory_mix: Vec<InventoryMixSlice>,
    /// Per-category inventory breakdown.
    pub inventory_breakdown: Vec<InventoryCategoryView>,
    /// Risk panel.
    pub risk: RiskPanel,
    /// Trend charts.
    pub charts: DashboardCharts,
    /// Effective division filter.
    pub division: String,
    /// Date-range preset token.
    pub range: String,
    /// Division values available for the borrower.
    pub divisions: Vec<String>,
}
