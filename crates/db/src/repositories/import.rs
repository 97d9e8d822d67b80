//! Import repository: one transaction per workbook import.
//!
//! The entire import either commits (report plus all row collections) or
//! rolls back; partial reports are never visible to readers.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use lendview_core::sheet::{OverviewRecord, RowFamily, RowRecord};

use crate::entities::{
    aging_composition, ar_metrics, borrower_overview, borrower_reports, borrowers,
    collateral_limits, collateral_overview, companies, composite_index, cumulative_variance,
    current_week_variance, fg_ineligible_detail, fg_inventory_metrics, forecast,
    ineligible_overview, ineligible_trend, nolv_table, risk_subfactors, rm_inventory_metrics,
    sales_gm_trend, specific_individuals, wip_inventory_metrics,
};

use super::borrower::delete_imported_rows;

/// Errors raised while persisting an import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The overview sheet carried no company identifier; import-fatal.
    #[error("Borrower Overview sheet missing Company ID")]
    MissingCompanyId,

    /// A bulk insert failed for one sheet; the transaction rolls back.
    #[error("sheet {sheet}: {source}")]
    Sheet {
        /// Workbook sheet name.
        sheet: String,
        /// Underlying database error.
        source: DbErr,
    },

    /// Database error outside any particular sheet.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Typed rows for one destination sheet.
#[derive(Debug, Clone)]
pub struct SheetBatch {
    /// Workbook sheet name, for error reporting.
    pub sheet_name: String,
    /// Destination row family.
    pub family: RowFamily,
    /// Admitted rows.
    pub records: Vec<RowRecord>,
}

/// Options for one persist call.
#[derive(Debug, Clone)]
pub struct PersistOptions {
    /// Original workbook filename.
    pub source_file: String,
    /// Resolved report date (explicit input > overview date > today).
    pub report_date: NaiveDate,
    /// Delete the borrower's previously imported data first.
    pub clear_existing: bool,
}

/// Identifiers produced by a committed import.
#[derive(Debug, Clone)]
pub struct PersistReceipt {
    /// Company primary key.
    pub company_id: i64,
    /// Borrower primary key.
    pub borrower_id: i64,
    /// New report primary key.
    pub report_id: i64,
}

/// Repository that persists a parsed workbook atomically.
#[derive(Debug, Clone)]
pub struct ImportRepository {
    db: DatabaseConnection,
}

impl ImportRepository {
    /// Creates a new import repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists one parsed workbook: resolves or creates the company and
    /// borrower from the overview record, creates the report, and bulk
    /// inserts every sheet batch. Runs in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::MissingCompanyId`] when the overview record
    /// has no company identifier, or a database error; in both cases
    /// nothing is persisted.
    pub async fn persist(
        &self,
        overview: &OverviewRecord,
        sheets: &[SheetBatch],
        options: &PersistOptions,
    ) -> Result<PersistReceipt, ImportError> {
        let txn = self.db.begin().await?;
        let now = Utc::now().naive_utc();

        let external_id = overview
            .int("Company ID")
            .filter(|id| *id != 0)
            .ok_or(ImportError::MissingCompanyId)?;

        let company = resolve_company(&txn, overview, external_id, now).await?;
        let borrower = resolve_borrower(&txn, overview, company.id, now).await?;

        if options.clear_existing {
            delete_imported_rows(&txn, borrower.id).await?;
        }

        register_specific_individual(&txn, overview, &borrower, now).await?;

        let report = borrower_reports::ActiveModel {
            borrower_id: Set(borrower.id),
            source_file: Set(Some(options.source_file.clone())),
            report_date: Set(Some(options.report_date)),
            created_at: Set(now),
            ..Default::default()
        };
        let report = borrower_reports::Entity::insert(report)
            .exec_with_returning(&txn)
            .await?;

        for batch in sheets {
            insert_family(&txn, batch, borrower.id, report.id, now)
                .await
                .map_err(|source| ImportError::Sheet {
                    sheet: batch.sheet_name.clone(),
                    source,
                })?;
        }

        txn.commit().await?;
        Ok(PersistReceipt {
            company_id: company.id,
            borrower_id: borrower.id,
            report_id: report.id,
        })
    }
}

/// Company de-duplication key is the external numeric id.
async fn resolve_company(
    txn: &DatabaseTransaction,
    overview: &OverviewRecord,
    external_id: i64,
    now: NaiveDateTime,
) -> Result<companies::Model, DbErr> {
    let existing = companies::Entity::find()
        .filter(companies::Column::CompanyId.eq(external_id))
        .one(txn)
        .await?;
    if let Some(company) = existing {
        return Ok(company);
    }

    let model = companies::ActiveModel {
        company_id: Set(external_id),
        name: Set(overview.text("Company")),
        industry: Set(overview.text("Industry")),
        primary_naics: Set(overview.text("Primary NAICS")),
        website: Set(overview.text("Website")),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    companies::Entity::insert(model).exec_with_returning(txn).await
}

/// Borrower de-duplication key is (company, primary contact name).
async fn resolve_borrower(
    txn: &DatabaseTransaction,
    overview: &OverviewRecord,
    company_pk: i64,
    now: NaiveDateTime,
) -> Result<borrowers::Model, DbErr> {
    let contact = overview.text("Primary Contact");
    let mut query =
        borrowers::Entity::find().filter(borrowers::Column::CompanyId.eq(company_pk));
    query = match &contact {
        Some(name) => query.filter(borrowers::Column::PrimaryContact.eq(name.clone())),
        None => query.filter(borrowers::Column::PrimaryContact.is_null()),
    };
    if let Some(borrower) = query.one(txn).await? {
        return Ok(borrower);
    }

    let model = borrowers::ActiveModel {
        company_id: Set(company_pk),
        primary_contact: Set(contact),
        primary_contact_phone: Set(overview.text("Primary Contact Phone")),
        primary_contact_email: Set(overview.text("Primary Contact Email")),
        update_interval: Set(overview.text("Update Interval")),
        current_update: Set(overview.date("Current Update")),
        previous_update: Set(overview.date("Previous Update")),
        next_update: Set(overview.date("Next Update")),
        lender: Set(overview.text("Lender")),
        lender_id: Set(overview.int("Lender ID")),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    borrowers::Entity::insert(model).exec_with_returning(txn).await
}

/// Registers the overview's named individual, when present, and makes it
/// the borrower's primary individual if none is set yet.
async fn register_specific_individual(
    txn: &DatabaseTransaction,
    overview: &OverviewRecord,
    borrower: &borrowers::Model,
    now: NaiveDateTime,
) -> Result<(), DbErr> {
    let name = overview.text("Specific Individual");
    let specific_id = overview.int("Specific ID");
    if name.is_none() && specific_id.is_none() {
        return Ok(());
    }

    let existing = specific_individuals::Entity::find()
        .filter(specific_individuals::Column::BorrowerId.eq(borrower.id))
        .filter(match &name {
            Some(value) => specific_individuals::Column::Name.eq(value.clone()),
            None => specific_individuals::Column::Name.is_null(),
        })
        .one(txn)
        .await?;

    let individual = match existing {
        Some(individual) => individual,
        None => {
            let model = specific_individuals::ActiveModel {
                borrower_id: Set(borrower.id),
                name: Set(name),
                specific_id: Set(specific_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            specific_individuals::Entity::insert(model)
                .exec_with_returning(txn)
                .await?
        }
    };

    if borrower.primary_specific_individual_id.is_none() {
        let mut update: borrowers::ActiveModel = borrower.clone().into();
        update.primary_specific_individual_id = Set(Some(individual.id));
        update.updated_at = Set(now);
        borrowers::Entity::update(update).exec(txn).await?;
    }
    Ok(())
}

/// Bulk inserts one sheet batch through its typed constructor. One batch
/// per sheet keeps throughput up; a failure aborts the whole import.
#[allow(clippy::too_many_lines)]
async fn insert_family(
    txn: &DatabaseTransaction,
    batch: &SheetBatch,
    borrower_id: i64,
    report_id: i64,
    now: NaiveDateTime,
) -> Result<(), DbErr> {
    let records = &batch.records;
    if records.is_empty() {
        return Ok(());
    }

    match batch.family {
        RowFamily::BorrowerOverview => {
            let models: Vec<borrower_overview::ActiveModel> = records
                .iter()
                .map(|r| borrower_overview::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    company: Set(r.text("company")),
                    company_id: Set(r.integer("company_id")),
                    industry: Set(r.text("industry")),
                    primary_naics: Set(r.text("primary_naics")),
                    website: Set(r.text("website")),
                    primary_contact: Set(r.text("primary_contact")),
                    primary_contact_phone: Set(r.text("primary_contact_phone")),
                    primary_contact_email: Set(r.text("primary_contact_email")),
                    update_interval: Set(r.text("update_interval")),
                    current_update: Set(r.date("current_update")),
                    previous_update: Set(r.date("previous_update")),
                    next_update: Set(r.date("next_update")),
                    lender: Set(r.text("lender")),
                    lender_id: Set(r.integer("lender_id")),
                    specific_individual: Set(r.text("specific_individual")),
                    specific_id: Set(r.integer("specific_id")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            borrower_overview::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::CollateralOverview => {
            let models: Vec<collateral_overview::ActiveModel> = records
                .iter()
                .map(|r| collateral_overview::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    main_type: Set(r.text("main_type")),
                    sub_type: Set(r.text("sub_type")),
                    beginning_collateral: Set(r.decimal("beginning_collateral")),
                    ineligibles: Set(r.decimal("ineligibles")),
                    eligible_collateral: Set(r.decimal("eligible_collateral")),
                    nolv_pct: Set(r.decimal("nolv_pct")),
                    dilution_rate: Set(r.decimal("dilution_rate")),
                    advanced_rate: Set(r.decimal("advanced_rate")),
                    rate_limit: Set(r.decimal("rate_limit")),
                    utilized_rate: Set(r.decimal("utilized_rate")),
                    pre_reserve_collateral: Set(r.decimal("pre_reserve_collateral")),
                    reserves: Set(r.decimal("reserves")),
                    net_collateral: Set(r.decimal("net_collateral")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            collateral_overview::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::AgingComposition => {
            let models: Vec<aging_composition::ActiveModel> = records
                .iter()
                .map(|r| aging_composition::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    division: Set(r.text("division")),
                    as_of_date: Set(r.date("as_of_date")),
                    bucket: Set(r.text("bucket")),
                    pct_of_total: Set(r.decimal("pct_of_total")),
                    amount: Set(r.decimal("amount")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            aging_composition::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::ArMetrics => {
            let models: Vec<ar_metrics::ActiveModel> = records
                .iter()
                .map(|r| ar_metrics::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    division: Set(r.text("division")),
                    as_of_date: Set(r.date("as_of_date")),
                    balance: Set(r.decimal("balance")),
                    dso: Set(r.decimal("dso")),
                    pct_past_due: Set(r.decimal("pct_past_due")),
                    current_amt: Set(r.decimal("current_amt")),
                    past_due_amt: Set(r.decimal("past_due_amt")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            ar_metrics::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::IneligibleTrend => {
            let models: Vec<ineligible_trend::ActiveModel> = records
                .iter()
                .map(|r| ineligible_trend::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    division: Set(r.text("division")),
                    total_ar: Set(r.decimal("total_ar")),
                    total_ineligible: Set(r.decimal("total_ineligible")),
                    ineligible_pct_of_ar: Set(r.decimal("ineligible_pct_of_ar")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            ineligible_trend::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::IneligibleOverview => {
            let models: Vec<ineligible_overview::ActiveModel> = records
                .iter()
                .map(|r| ineligible_overview::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    division: Set(r.text("division")),
                    past_due_gt_90_days: Set(r.decimal("past_due_gt_90_days")),
                    dilution: Set(r.decimal("dilution")),
                    cross_age: Set(r.decimal("cross_age")),
                    concentration_over_cap: Set(r.decimal("concentration_over_cap")),
                    foreign_ar: Set(r.decimal("foreign_ar")),
                    government: Set(r.decimal("government")),
                    intercompany: Set(r.decimal("intercompany")),
                    contra: Set(r.decimal("contra")),
                    other: Set(r.decimal("other")),
                    total_ineligible: Set(r.decimal("total_ineligible")),
                    ineligible_pct_of_ar: Set(r.decimal("ineligible_pct_of_ar")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            ineligible_overview::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::FgInventoryMetrics => {
            let models: Vec<fg_inventory_metrics::ActiveModel> = records
                .iter()
                .map(|r| fg_inventory_metrics::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    inventory_type: Set(r.text("inventory_type")),
                    division: Set(r.text("division")),
                    as_of_date: Set(r.date("as_of_date")),
                    total_inventory: Set(r.decimal("total_inventory")),
                    ineligible_inventory: Set(r.decimal("ineligible_inventory")),
                    available_inventory: Set(r.decimal("available_inventory")),
                    ineligible_pct_of_inventory: Set(r.decimal("ineligible_pct_of_inventory")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            fg_inventory_metrics::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::RmInventoryMetrics => {
            let models: Vec<rm_inventory_metrics::ActiveModel> = records
                .iter()
                .map(|r| rm_inventory_metrics::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    inventory_type: Set(r.text("inventory_type")),
                    division: Set(r.text("division")),
                    as_of_date: Set(r.date("as_of_date")),
                    total_inventory: Set(r.decimal("total_inventory")),
                    ineligible_inventory: Set(r.decimal("ineligible_inventory")),
                    available_inventory: Set(r.decimal("available_inventory")),
                    ineligible_pct_of_inventory: Set(r.decimal("ineligible_pct_of_inventory")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            rm_inventory_metrics::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::WipInventoryMetrics => {
            let models: Vec<wip_inventory_metrics::ActiveModel> = records
                .iter()
                .map(|r| wip_inventory_metrics::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    inventory_type: Set(r.text("inventory_type")),
                    division: Set(r.text("division")),
                    as_of_date: Set(r.date("as_of_date")),
                    total_inventory: Set(r.decimal("total_inventory")),
                    ineligible_inventory: Set(r.decimal("ineligible_inventory")),
                    available_inventory: Set(r.decimal("available_inventory")),
                    ineligible_pct_of_inventory: Set(r.decimal("ineligible_pct_of_inventory")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            wip_inventory_metrics::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::FgIneligibleDetail => {
            let models: Vec<fg_ineligible_detail::ActiveModel> = records
                .iter()
                .map(|r| fg_ineligible_detail::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    inventory_type: Set(r.text("inventory_type")),
                    division: Set(r.text("division")),
                    slow_moving_obsolete: Set(r.decimal("slow_moving_obsolete")),
                    aged: Set(r.decimal("aged")),
                    off_site: Set(r.decimal("off_site")),
                    consigned: Set(r.decimal("consigned")),
                    in_transit: Set(r.decimal("in_transit")),
                    damaged_non_saleable: Set(r.decimal("damaged_non_saleable")),
                    total_ineligible: Set(r.decimal("total_ineligible")),
                    ineligible_pct_of_inventory: Set(r.decimal("ineligible_pct_of_inventory")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            fg_ineligible_detail::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::SalesGmTrend => {
            let models: Vec<sales_gm_trend::ActiveModel> = records
                .iter()
                .map(|r| sales_gm_trend::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    division: Set(r.text("division")),
                    as_of_date: Set(r.date("as_of_date")),
                    net_sales: Set(r.decimal("net_sales")),
                    gross_margin_pct: Set(r.decimal("gross_margin_pct")),
                    gross_margin_dollars: Set(r.decimal("gross_margin_dollars")),
                    ttm_sales: Set(r.decimal("ttm_sales")),
                    ttm_sales_prior: Set(r.decimal("ttm_sales_prior")),
                    trend_ttm_pct: Set(r.decimal("trend_ttm_pct")),
                    ma3: Set(r.decimal("ma3")),
                    ma3_prior: Set(r.decimal("ma3_prior")),
                    trend_3_m_pct: Set(r.decimal("trend_3_m_pct")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            sales_gm_trend::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::NolvTable => {
            let models: Vec<nolv_table::ActiveModel> = records
                .iter()
                .map(|r| nolv_table::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    division: Set(r.text("division")),
                    line_item: Set(r.text("line_item")),
                    fg_usd: Set(r.decimal("fg_usd")),
                    fg_pct_cost: Set(r.decimal("fg_pct_cost")),
                    rm_usd: Set(r.decimal("rm_usd")),
                    rm_pct_cost: Set(r.decimal("rm_pct_cost")),
                    wip_usd: Set(r.decimal("wip_usd")),
                    wip_pct_cost: Set(r.decimal("wip_pct_cost")),
                    total_usd: Set(r.decimal("total_usd")),
                    total_pct_cost: Set(r.decimal("total_pct_cost")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            nolv_table::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::RiskSubfactors => {
            let models: Vec<risk_subfactors::ActiveModel> = records
                .iter()
                .map(|r| risk_subfactors::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    main_category: Set(r.text("main_category")),
                    sub_risk: Set(r.text("sub_risk")),
                    risk_score: Set(r.decimal("risk_score")),
                    high_impact_factor: Set(r.text("high_impact_factor")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            risk_subfactors::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::CompositeIndex => {
            let models: Vec<composite_index::ActiveModel> = records
                .iter()
                .map(|r| composite_index::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    overall_score: Set(r.decimal("overall_score")),
                    ar_risk: Set(r.decimal("ar_risk")),
                    inventory_risk: Set(r.decimal("inventory_risk")),
                    company_risk: Set(r.decimal("company_risk")),
                    industry_risk: Set(r.decimal("industry_risk")),
                    weight_ar: Set(r.decimal("weight_ar")),
                    weight_inventory: Set(r.decimal("weight_inventory")),
                    weight_company: Set(r.decimal("weight_company")),
                    weight_industry: Set(r.decimal("weight_industry")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            composite_index::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::Forecast => {
            let models: Vec<forecast::ActiveModel> = records
                .iter()
                .map(|r| forecast::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    as_of_date: Set(r.date("as_of_date")),
                    period: Set(r.date("period")),
                    actual_forecast: Set(r.text("actual_forecast")),
                    available_collateral: Set(r.decimal("available_collateral")),
                    loan_balance: Set(r.decimal("loan_balance")),
                    revolver_availability: Set(r.decimal("revolver_availability")),
                    net_sales: Set(r.decimal("net_sales")),
                    gross_margin_pct: Set(r.decimal("gross_margin_pct")),
                    ar: Set(r.decimal("ar")),
                    finished_goods: Set(r.decimal("finished_goods")),
                    raw_materials: Set(r.decimal("raw_materials")),
                    work_in_process: Set(r.decimal("work_in_process")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            forecast::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::CurrentWeekVariance => {
            let models: Vec<current_week_variance::ActiveModel> = records
                .iter()
                .map(|r| current_week_variance::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    category: Set(r.text("category")),
                    projected: Set(r.decimal("projected")),
                    actual: Set(r.decimal("actual")),
                    variance: Set(r.decimal("variance")),
                    variance_pct: Set(r.decimal("variance_pct")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            current_week_variance::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::CumulativeVariance => {
            let models: Vec<cumulative_variance::ActiveModel> = records
                .iter()
                .map(|r| cumulative_variance::ActiveModel {
                    borrower_id: Set(borrower_id),
                    report_id: Set(report_id),
                    date: Set(r.date("date")),
                    category: Set(r.text("category")),
                    projected: Set(r.decimal("projected")),
                    actual: Set(r.decimal("actual")),
                    variance: Set(r.decimal("variance")),
                    variance_pct: Set(r.decimal("variance_pct")),
                    created_at: Set(now),
                    ..Default::default()
                })
                .collect();
            cumulative_variance::Entity::insert_many(models).exec(txn).await?;
        }
        RowFamily::CollateralLimits => {
            // Borrower-scoped and report-independent.
            let models: Vec<collateral_limits::ActiveModel> = records
                .iter()
                .map(|r| collateral_limits::ActiveModel {
                    borrower_id: Set(borrower_id),
                    division: Set(r.text("division")),
                    collateral_type: Set(r.text("collateral_type")),
                    collateral_sub_type: Set(r.text("collateral_sub_type")),
                    usd_limit: Set(r.decimal("usd_limit")),
                    pct_limit: Set(r.decimal("pct_limit")),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                })
                .collect();
            collateral_limits::Entity::insert_many(models).exec(txn).await?;
        }
    }

    Ok(())
}
