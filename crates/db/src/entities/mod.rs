//! `SeaORM` entity definitions.
//!
//! Core entities (companies, borrowers, reports) plus one row entity per
//! imported sheet family. Row tables are append-only: corrections arrive as
//! new reports, never as in-place edits.

pub mod aging_composition;
pub mod ar_metrics;
pub mod borrower_overview;
pub mod borrower_reports;
pub mod borrowers;
pub mod collateral_limits;
pub mod collateral_overview;
pub mod companies;
pub mod composite_index;
pub mod cumulative_variance;
pub mod current_week_variance;
pub mod fg_ineligible_detail;
pub mod fg_inventory_metrics;
pub mod forecast;
pub mod ineligible_overview;
pub mod ineligible_trend;
pub mod nolv_table;
pub mod risk_subfactors;
pub mod rm_inventory_metrics;
pub mod sales_gm_trend;
pub mod specific_individuals;
pub mod wip_inventory_metrics;
