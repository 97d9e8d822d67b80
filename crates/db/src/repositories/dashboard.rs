//! Dashboard repository: loads everything the view-model builder needs.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use lendview_core::collateral::{CollateralRow, RateLimitEntry};
use lendview_core::dashboard::{ArSnapshot, BorrowerProfile, DashboardInputs};
use lendview_core::risk::{CompositeScores, RiskSubfactor};

use crate::entities::{
    ar_metrics, borrowers, collateral_limits, collateral_overview, companies, composite_index,
    risk_subfactors,
};

/// Repository that assembles [`DashboardInputs`] for one borrower.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the dashboard inputs for a borrower, or `None` when the
    /// borrower does not exist. Each request recomputes from storage; there
    /// is no cache.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn load_inputs(&self, borrower_id: i64) -> Result<Option<DashboardInputs>, DbErr> {
        let Some(borrower) = borrowers::Entity::find_by_id(borrower_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let company = companies::Entity::find_by_id(borrower.company_id)
            .one(&self.db)
            .await?;

        let profile = BorrowerProfile {
            borrower_id: borrower.id,
            company_id: borrower.company_id,
            company_name: company.as_ref().and_then(|c| c.name.clone()),
            company_external_id: company.as_ref().map(|c| c.company_id),
            industry: company.as_ref().and_then(|c| c.industry.clone()),
            primary_naics: company.as_ref().and_then(|c| c.primary_naics.clone()),
            website: company.as_ref().and_then(|c| c.website.clone()),
            primary_contact: borrower.primary_contact,
            primary_contact_phone: borrower.primary_contact_phone,
            primary_contact_email: borrower.primary_contact_email,
            update_interval: borrower.update_interval,
            current_update: borrower.current_update,
            previous_update: borrower.previous_update,
            next_update: borrower.next_update,
            lender: borrower.lender,
        };

        let collateral = collateral_overview::Entity::find()
            .filter(collateral_overview::Column::BorrowerId.eq(borrower_id))
            .order_by_asc(collateral_overview::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| CollateralRow {
                created_at: row.created_at,
                main_type: row.main_type,
                sub_type: row.sub_type,
                beginning_collateral: row.beginning_collateral,
                ineligibles: row.ineligibles,
                eligible_collateral: row.eligible_collateral,
                nolv_pct: row.nolv_pct,
                dilution_rate: row.dilution_rate,
                advanced_rate: row.advanced_rate,
                rate_limit: row.rate_limit,
                utilized_rate: row.utilized_rate,
                pre_reserve_collateral: row.pre_reserve_collateral,
                reserves: row.reserves,
                net_collateral: row.net_collateral,
            })
            .collect();

        let limits = collateral_limits::Entity::find()
            .filter(collateral_limits::Column::BorrowerId.eq(borrower_id))
            .order_by_asc(collateral_limits::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| RateLimitEntry {
                division: row.division,
                collateral_type: row.collateral_type,
                collateral_sub_type: row.collateral_sub_type,
                usd_limit: row.usd_limit,
                pct_limit: row.pct_limit,
            })
            .collect();

        let ar = ar_metrics::Entity::find()
            .filter(ar_metrics::Column::BorrowerId.eq(borrower_id))
            .order_by_asc(ar_metrics::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| ArSnapshot {
                created_at: row.created_at,
                as_of_date: row.as_of_date,
                division: row.division,
                balance: row.balance,
                pct_past_due: row.pct_past_due,
            })
            .collect();

        let subfactors = risk_subfactors::Entity::find()
            .filter(risk_subfactors::Column::BorrowerId.eq(borrower_id))
            .order_by_asc(risk_subfactors::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| RiskSubfactor {
                main_category: row.main_category,
                sub_risk: row.sub_risk,
                risk_score: row.risk_score,
                high_impact_factor: row.high_impact_factor,
            })
            .collect();

        // Latest composite row wins; missing sub-scores keep their defaults.
        let composite_row = composite_index::Entity::find()
            .filter(composite_index::Column::BorrowerId.eq(borrower_id))
            .order_by_desc(composite_index::Column::Date)
            .order_by_desc(composite_index::Column::CreatedAt)
            .one(&self.db)
            .await?;
        let composite = composite_row.map_or_else(CompositeScores::default, |row| {
            let defaults = CompositeScores::default();
            CompositeScores {
                overall: row.overall_score,
                ar: row.ar_risk.unwrap_or(defaults.ar),
                inventory: row.inventory_risk.unwrap_or(defaults.inventory),
                company: row.company_risk.unwrap_or(defaults.company),
                industry: row.industry_risk.unwrap_or(defaults.industry),
            }
        });

        let divisions: Vec<String> = ar_metrics::Entity::find()
            .filter(ar_metrics::Column::BorrowerId.eq(borrower_id))
            .select_only()
            .column(ar_metrics::Column::Division)
            .distinct()
            .into_tuple::<Option<String>>()
            .all(&self.db)
            .await?
            .into_iter()
            .flatten()
            .filter(|division| !division.is_empty())
            .collect();

        Ok(Some(DashboardInputs {
            profile,
            collateral,
            limits,
            ar,
            subfactors,
            composite,
            divisions,
        }))
    }
}
