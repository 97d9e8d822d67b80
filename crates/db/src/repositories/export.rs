//! Export repository: row-family queries for workbook export.
//!
//! Rows come back as JSON objects so the export writer can walk each
//! family's declared field list without one hand-written mapper per entity.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use lendview_core::sheet::RowFamily;

use crate::entities::{
    aging_composition, ar_metrics, borrower_overview, collateral_limits, collateral_overview,
    composite_index, cumulative_variance, current_week_variance, fg_ineligible_detail,
    fg_inventory_metrics, forecast, ineligible_overview, ineligible_trend, nolv_table,
    risk_subfactors, rm_inventory_metrics, sales_gm_trend, wip_inventory_metrics,
};

/// Repository that pulls persisted rows per family for one borrower.
#[derive(Debug, Clone)]
pub struct ExportRepository {
    db: DatabaseConnection,
}

async fn fetch<E>(
    db: &DatabaseConnection,
    borrower_column: E::Column,
    id_column: E::Column,
    borrower_id: i64,
) -> Result<Vec<serde_json::Value>, DbErr>
where
    E: EntityTrait,
    E::Model: Serialize,
{
    let rows = E::find()
        .filter(borrower_column.eq(borrower_id))
        .order_by_asc(id_column)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|model| serde_json::to_value(model).ok())
        .collect())
}

impl ExportRepository {
    /// Creates a new export repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads all rows of one family for a borrower as JSON objects, in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn family_rows(
        &self,
        borrower_id: i64,
        family: RowFamily,
    ) -> Result<Vec<serde_json::Value>, DbErr> {
        macro_rules! rows {
            ($entity:ident) => {
                fetch::<$entity::Entity>(
                    &self.db,
                    $entity::Column::BorrowerId,
                    $entity::Column::Id,
                    borrower_id,
                )
                .await
            };
        }

        match family {
            RowFamily::BorrowerOverview => rows!(borrower_overview),
            RowFamily::CollateralOverview => rows!(collateral_overview),
            RowFamily::AgingComposition => rows!(aging_composition),
            RowFamily::ArMetrics => rows!(ar_metrics),
            RowFamily::IneligibleTrend => rows!(ineligible_trend),
            RowFamily::IneligibleOverview => rows!(ineligible_overview),
            RowFamily::FgInventoryMetrics => rows!(fg_inventory_metrics),
            RowFamily::RmInventoryMetrics => rows!(rm_inventory_metrics),
            RowFamily::WipInventoryMetrics => rows!(wip_inventory_metrics),
            RowFamily::FgIneligibleDetail => rows!(fg_ineligible_detail),
            RowFamily::SalesGmTrend => rows!(sales_gm_trend),
            RowFamily::NolvTable => rows!(nolv_table),
            RowFamily::RiskSubfactors => rows!(risk_subfactors),
            RowFamily::CompositeIndex => rows!(composite_index),
            RowFamily::Forecast => rows!(forecast),
            RowFamily::CurrentWeekVariance => rows!(current_week_variance),
            RowFamily::CumulativeVariance => rows!(cumulative_variance),
            RowFamily::CollateralLimits => rows!(collateral_limits),
        }
    }
}
