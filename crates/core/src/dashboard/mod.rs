//! Dashboard view-model assembly.
//!
//! The builder takes rows fetched by the storage layer plus an explicit
//! request (date-range preset, division filter) and produces the fully
//! formatted dashboard context. Missing data renders as `—` rather than
//! erroring.

pub mod builder;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::{build_dashboard, resolve_division, DashboardRequest};
pub use types::{
    ArSnapshot, BorrowerProfile, BorrowerSummary, ChartView, CollateralNode, CollateralRowView,
    DashboardCharts, DashboardContext, DashboardInputs, InventoryCategoryView, InventoryMixSlice,
    KpiCard, RiskBar, RiskMetricView, RiskPanel,
};
