//! Plain collateral row types consumed by the aggregation engine.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// One persisted collateral composition row, detached from the storage
/// layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollateralRow {
    /// Creation timestamp; rows sharing the latest timestamp form the
    /// current snapshot.
    pub created_at: NaiveDateTime,
    /// Main collateral type ("Inventory", "Accounts Receivable", …).
    pub main_type: Option<String>,
    /// Collateral sub-type ("Finished Goods", …).
    pub sub_type: Option<String>,
    /// Beginning collateral value.
    pub beginning_collateral: Option<Decimal>,
    /// Ineligible value.
    pub ineligibles: Option<Decimal>,
    /// Eligible collateral value.
    pub eligible_collateral: Option<Decimal>,
    /// Net orderly liquidation value ratio.
    pub nolv_pct: Option<Decimal>,
    /// Dilution rate.
    pub dilution_rate: Option<Decimal>,
    /// Advanced rate.
    pub advanced_rate: Option<Decimal>,
    /// Stored rate limit, used when no limits-table entry matches.
    pub rate_limit: Option<Decimal>,
    /// Utilized rate.
    pub utilized_rate: Option<Decimal>,
    /// Pre-reserve collateral value.
    pub pre_reserve_collateral: Option<Decimal>,
    /// Reserves.
    pub reserves: Option<Decimal>,
    /// Net collateral value.
    pub net_collateral: Option<Decimal>,
}

/// One borrower-level collateral limit entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateLimitEntry {
    /// Division the limit applies to.
    pub division: Option<String>,
    /// Collateral main type the limit matches on.
    pub collateral_type: Option<String>,
    /// Collateral sub-type the limit matches on.
    pub collateral_sub_type: Option<String>,
    /// Dollar limit.
    pub usd_limit: Option<Decimal>,
    /// Rate limit.
    pub pct_limit: Option<Decimal>,
}
