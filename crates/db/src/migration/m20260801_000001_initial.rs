//! Initial database migration.
//!
//! Creates the core entities (companies, borrowers, reports) and one table
//! per imported row family. Ownership cascades are declared here and also
//! enforced explicitly at the repository layer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CORE ENTITIES
        // ============================================================
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(BORROWERS_SQL).await?;
        db.execute_unprepared(SPECIFIC_INDIVIDUALS_SQL).await?;
        db.execute_unprepared(BORROWER_REPORTS_SQL).await?;

        // ============================================================
        // PART 2: REPORT-SCOPED ROW FAMILIES
        // ============================================================
        db.execute_unprepared(BORROWER_OVERVIEW_SQL).await?;
        db.execute_unprepared(COLLATERAL_OVERVIEW_SQL).await?;
        db.execute_unprepared(AGING_COMPOSITION_SQL).await?;
        db.execute_unprepared(AR_METRICS_SQL).await?;
        db.execute_unprepared(INELIGIBLE_TREND_SQL).await?;
        db.execute_unprepared(INELIGIBLE_OVERVIEW_SQL).await?;
        db.execute_unprepared(INVENTORY_METRICS_SQL).await?;
        db.execute_unprepared(FG_INELIGIBLE_DETAIL_SQL).await?;
        db.execute_unprepared(SALES_GM_TREND_SQL).await?;
        db.execute_unprepared(NOLV_TABLE_SQL).await?;
        db.execute_unprepared(RISK_SQL).await?;
        db.execute_unprepared(FORECAST_SQL).await?;
        db.execute_unprepared(VARIANCE_SQL).await?;

        // ============================================================
        // PART 3: BORROWER-SCOPED TABLES
        // ============================================================
        db.execute_unprepared(COLLATERAL_LIMITS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id BIGSERIAL PRIMARY KEY,
    company_id BIGINT NOT NULL UNIQUE,
    name VARCHAR(255),
    industry VARCHAR(255),
    primary_naics VARCHAR(255),
    website VARCHAR(255),
    email VARCHAR(255),
    password_hash VARCHAR(255),
    created_at TIMESTAMP NOT NULL DEFAULT now(),
    updated_at TIMESTAMP NOT NULL DEFAULT now()
);
";

const BORROWERS_SQL: &str = r"
CREATE TABLE borrowers (
    id BIGSERIAL PRIMARY KEY,
    company_id BIGINT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    primary_contact VARCHAR(255),
    primary_contact_phone VARCHAR(30),
    primary_contact_email VARCHAR(255),
    update_interval VARCHAR(50),
    current_update DATE,
    previous_update DATE,
    next_update DATE,
    lender VARCHAR(255),
    lender_id BIGINT,
    primary_specific_individual_id BIGINT,
    created_at TIMESTAMP NOT NULL DEFAULT now(),
    updated_at TIMESTAMP NOT NULL DEFAULT now(),
    CONSTRAINT borrowers_company_contact_unique UNIQUE (company_id, primary_contact)
);
CREATE INDEX idx_borrowers_company ON borrowers (company_id);
";

const SPECIFIC_INDIVIDUALS_SQL: &str = r"
CREATE TABLE specific_individuals (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    name VARCHAR(255),
    specific_id BIGINT,
    created_at TIMESTAMP NOT NULL DEFAULT now(),
    updated_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_specific_individuals_borrower ON specific_individuals (borrower_id);
";

const BORROWER_REPORTS_SQL: &str = r"
CREATE TABLE borrower_reports (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    source_file VARCHAR(255),
    report_date DATE,
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_borrower_reports_borrower ON borrower_reports (borrower_id);
";

const BORROWER_OVERVIEW_SQL: &str = r"
CREATE TABLE borrower_overview (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    company VARCHAR(255),
    company_id BIGINT,
    industry VARCHAR(255),
    primary_naics VARCHAR(255),
    website VARCHAR(255),
    primary_contact VARCHAR(255),
    primary_contact_phone VARCHAR(30),
    primary_contact_email VARCHAR(255),
    update_interval VARCHAR(50),
    current_update DATE,
    previous_update DATE,
    next_update DATE,
    lender VARCHAR(255),
    lender_id BIGINT,
    specific_individual VARCHAR(255),
    specific_id BIGINT,
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_borrower_overview_borrower ON borrower_overview (borrower_id);
CREATE INDEX idx_borrower_overview_report ON borrower_overview (report_id);
";

const COLLATERAL_OVERVIEW_SQL: &str = r"
CREATE TABLE collateral_overview (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    main_type VARCHAR(255),
    sub_type VARCHAR(255),
    beginning_collateral NUMERIC(20, 2),
    ineligibles NUMERIC(20, 6),
    eligible_collateral NUMERIC(20, 2),
    nolv_pct NUMERIC(12, 6),
    dilution_rate NUMERIC(12, 6),
    advanced_rate NUMERIC(12, 6),
    rate_limit NUMERIC(12, 6),
    utilized_rate NUMERIC(12, 6),
    pre_reserve_collateral NUMERIC(20, 2),
    reserves NUMERIC(20, 6),
    net_collateral NUMERIC(20, 2),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_collateral_overview_borrower ON collateral_overview (borrower_id);
CREATE INDEX idx_collateral_overview_report ON collateral_overview (report_id);
";

const AGING_COMPOSITION_SQL: &str = r"
CREATE TABLE aging_composition (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    division VARCHAR(255),
    as_of_date DATE,
    bucket VARCHAR(255),
    pct_of_total NUMERIC(12, 6),
    amount NUMERIC(20, 2),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_aging_composition_borrower ON aging_composition (borrower_id);
CREATE INDEX idx_aging_composition_report ON aging_composition (report_id);
";

const AR_METRICS_SQL: &str = r"
CREATE TABLE ar_metrics (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    division VARCHAR(255),
    as_of_date DATE,
    balance NUMERIC(20, 2),
    dso NUMERIC(20, 6),
    pct_past_due NUMERIC(12, 6),
    current_amt NUMERIC(20, 2),
    past_due_amt NUMERIC(20, 2),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_ar_metrics_borrower ON ar_metrics (borrower_id);
CREATE INDEX idx_ar_metrics_report ON ar_metrics (report_id);
";

const INELIGIBLE_TREND_SQL: &str = r"
CREATE TABLE ineligible_trend (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    division VARCHAR(255),
    total_ar NUMERIC(20, 2),
    total_ineligible NUMERIC(20, 2),
    ineligible_pct_of_ar NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_ineligible_trend_borrower ON ineligible_trend (borrower_id);
CREATE INDEX idx_ineligible_trend_report ON ineligible_trend (report_id);
";

const INELIGIBLE_OVERVIEW_SQL: &str = r"
CREATE TABLE ineligible_overview (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    division VARCHAR(255),
    past_due_gt_90_days NUMERIC(20, 2),
    dilution NUMERIC(20, 6),
    cross_age NUMERIC(20, 6),
    concentration_over_cap NUMERIC(20, 6),
    foreign_ar NUMERIC(20, 6),
    government NUMERIC(20, 6),
    intercompany NUMERIC(20, 6),
    contra NUMERIC(20, 6),
    other NUMERIC(20, 6),
    total_ineligible NUMERIC(20, 2),
    ineligible_pct_of_ar NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_ineligible_overview_borrower ON ineligible_overview (borrower_id);
CREATE INDEX idx_ineligible_overview_report ON ineligible_overview (report_id);
";

const INVENTORY_METRICS_SQL: &str = r"
CREATE TABLE fg_inventory_metrics (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    inventory_type VARCHAR(255),
    division VARCHAR(255),
    as_of_date DATE,
    total_inventory NUMERIC(20, 2),
    ineligible_inventory NUMERIC(20, 2),
    available_inventory NUMERIC(20, 2),
    ineligible_pct_of_inventory NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_fg_inventory_metrics_borrower ON fg_inventory_metrics (borrower_id);
CREATE INDEX idx_fg_inventory_metrics_report ON fg_inventory_metrics (report_id);

CREATE TABLE rm_inventory_metrics (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    inventory_type VARCHAR(255),
    division VARCHAR(255),
    as_of_date DATE,
    total_inventory NUMERIC(20, 2),
    ineligible_inventory NUMERIC(20, 2),
    available_inventory NUMERIC(20, 2),
    ineligible_pct_of_inventory NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_rm_inventory_metrics_borrower ON rm_inventory_metrics (borrower_id);
CREATE INDEX idx_rm_inventory_metrics_report ON rm_inventory_metrics (report_id);

CREATE TABLE wip_inventory_metrics (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    inventory_type VARCHAR(255),
    division VARCHAR(255),
    as_of_date DATE,
    total_inventory NUMERIC(20, 2),
    ineligible_inventory NUMERIC(20, 2),
    available_inventory NUMERIC(20, 2),
    ineligible_pct_of_inventory NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_wip_inventory_metrics_borrower ON wip_inventory_metrics (borrower_id);
CREATE INDEX idx_wip_inventory_metrics_report ON wip_inventory_metrics (report_id);
";

const FG_INELIGIBLE_DETAIL_SQL: &str = r"
CREATE TABLE fg_ineligible_detail (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    inventory_type VARCHAR(255),
    division VARCHAR(255),
    slow_moving_obsolete NUMERIC(20, 6),
    aged NUMERIC(20, 6),
    off_site NUMERIC(20, 6),
    consigned NUMERIC(20, 6),
    in_transit NUMERIC(20, 6),
    damaged_non_saleable NUMERIC(20, 6),
    total_ineligible NUMERIC(20, 2),
    ineligible_pct_of_inventory NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_fg_ineligible_detail_borrower ON fg_ineligible_detail (borrower_id);
CREATE INDEX idx_fg_ineligible_detail_report ON fg_ineligible_detail (report_id);
";

const SALES_GM_TREND_SQL: &str = r"
CREATE TABLE sales_gm_trend (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    division VARCHAR(255),
    as_of_date DATE,
    net_sales NUMERIC(20, 2),
    gross_margin_pct NUMERIC(12, 6),
    gross_margin_dollars NUMERIC(20, 2),
    ttm_sales NUMERIC(20, 2),
    ttm_sales_prior NUMERIC(20, 2),
    trend_ttm_pct NUMERIC(12, 6),
    ma3 NUMERIC(20, 6),
    ma3_prior NUMERIC(20, 6),
    trend_3_m_pct NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_sales_gm_trend_borrower ON sales_gm_trend (borrower_id);
CREATE INDEX idx_sales_gm_trend_report ON sales_gm_trend (report_id);
";

const NOLV_TABLE_SQL: &str = r"
CREATE TABLE nolv_table (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    division VARCHAR(255),
    line_item VARCHAR(255),
    fg_usd NUMERIC(20, 2),
    fg_pct_cost NUMERIC(12, 6),
    rm_usd NUMERIC(20, 2),
    rm_pct_cost NUMERIC(12, 6),
    wip_usd NUMERIC(20, 2),
    wip_pct_cost NUMERIC(12, 6),
    total_usd NUMERIC(20, 2),
    total_pct_cost NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_nolv_table_borrower ON nolv_table (borrower_id);
CREATE INDEX idx_nolv_table_report ON nolv_table (report_id);
";

const RISK_SQL: &str = r"
CREATE TABLE risk_subfactors (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    main_category VARCHAR(255),
    sub_risk VARCHAR(255),
    risk_score NUMERIC(20, 6),
    high_impact_factor VARCHAR(255),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_risk_subfactors_borrower ON risk_subfactors (borrower_id);
CREATE INDEX idx_risk_subfactors_report ON risk_subfactors (report_id);

CREATE TABLE composite_index (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    overall_score NUMERIC(20, 6),
    ar_risk NUMERIC(20, 6),
    inventory_risk NUMERIC(20, 6),
    company_risk NUMERIC(20, 6),
    industry_risk NUMERIC(20, 6),
    weight_ar NUMERIC(20, 6),
    weight_inventory NUMERIC(20, 6),
    weight_company NUMERIC(20, 6),
    weight_industry NUMERIC(20, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_composite_index_borrower ON composite_index (borrower_id);
CREATE INDEX idx_composite_index_report ON composite_index (report_id);
";

const FORECAST_SQL: &str = r"
CREATE TABLE forecast (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    as_of_date DATE,
    period DATE,
    actual_forecast VARCHAR(255),
    available_collateral NUMERIC(20, 2),
    loan_balance NUMERIC(20, 2),
    revolver_availability NUMERIC(20, 2),
    net_sales NUMERIC(20, 2),
    gross_margin_pct NUMERIC(12, 6),
    ar NUMERIC(20, 2),
    finished_goods NUMERIC(20, 6),
    raw_materials NUMERIC(20, 6),
    work_in_process NUMERIC(20, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_forecast_borrower ON forecast (borrower_id);
CREATE INDEX idx_forecast_report ON forecast (report_id);
";

const VARIANCE_SQL: &str = r"
CREATE TABLE current_week_variance (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    category VARCHAR(255),
    projected NUMERIC(20, 6),
    actual NUMERIC(20, 6),
    variance NUMERIC(20, 2),
    variance_pct NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_current_week_variance_borrower ON current_week_variance (borrower_id);
CREATE INDEX idx_current_week_variance_report ON current_week_variance (report_id);

CREATE TABLE cumulative_variance (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    report_id BIGINT NOT NULL REFERENCES borrower_reports(id) ON DELETE CASCADE,
    date DATE,
    category VARCHAR(255),
    projected NUMERIC(20, 6),
    actual NUMERIC(20, 6),
    variance NUMERIC(20, 2),
    variance_pct NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_cumulative_variance_borrower ON cumulative_variance (borrower_id);
CREATE INDEX idx_cumulative_variance_report ON cumulative_variance (report_id);
";

const COLLATERAL_LIMITS_SQL: &str = r"
CREATE TABLE collateral_limits (
    id BIGSERIAL PRIMARY KEY,
    borrower_id BIGINT NOT NULL REFERENCES borrowers(id) ON DELETE CASCADE,
    division VARCHAR(255),
    collateral_type VARCHAR(255),
    collateral_sub_type VARCHAR(255),
    usd_limit NUMERIC(20, 2),
    pct_limit NUMERIC(12, 6),
    created_at TIMESTAMP NOT NULL DEFAULT now(),
    updated_at TIMESTAMP NOT NULL DEFAULT now()
);
CREATE INDEX idx_collateral_limits_borrower ON collateral_limits (borrower_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS collateral_limits;
DROP TABLE IF EXISTS cumulative_variance;
DROP TABLE IF EXISTS current_week_variance;
DROP TABLE IF EXISTS forecast;
DROP TABLE IF EXISTS composite_index;
DROP TABLE IF EXISTS risk_subfactors;
DROP TABLE IF EXISTS nolv_table;
DROP TABLE IF EXISTS sales_gm_trend;
DROP TABLE IF EXISTS fg_ineligible_detail;
DROP TABLE IF EXISTS wip_inventory_metrics;
DROP TABLE IF EXISTS rm_inventory_metrics;
DROP TABLE IF EXISTS fg_inventory_metrics;
DROP TABLE IF EXISTS ineligible_overview;
DROP TABLE IF EXISTS ineligible_trend;
DROP TABLE IF EXISTS ar_metrics;
DROP TABLE IF EXISTS aging_composition;
DROP TABLE IF EXISTS collateral_overview;
DROP TABLE IF EXISTS borrower_overview;
DROP TABLE IF EXISTS borrower_reports;
DROP TABLE IF EXISTS specific_individuals;
DROP TABLE IF EXISTS borrowers;
DROP TABLE IF EXISTS companies;
";
