//! Sheet schema registry: the sheet-name → row-family dispatch table.
//!
//! Each destination row family declares its typed field set once; the
//! importer consumes only normalized columns that match a declared field and
//! ignores the rest, so extra spreadsheet columns stay forward-compatible.

use super::header::normalize_header;

/// Declared type of a row field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Calendar date.
    Date,
    /// Exact decimal.
    Decimal,
    /// Integer.
    Integer,
    /// Free text.
    Text,
}

/// One typed field of a row family.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Canonical snake_case field name.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
}

const fn date(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Date,
    }
}

const fn decimal(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Decimal,
    }
}

const fn integer(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Integer,
    }
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text,
    }
}

/// Destination row families, one per imported sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowFamily {
    /// Overview sheet stored verbatim alongside the resolved borrower.
    BorrowerOverview,
    /// Collateral composition snapshot.
    CollateralOverview,
    /// AR aging buckets.
    AgingComposition,
    /// AR balance and DSO metrics.
    ArMetrics,
    /// AR ineligible trend history.
    IneligibleTrend,
    /// AR ineligible breakdown by reason.
    IneligibleOverview,
    /// Finished goods inventory metrics.
    FgInventoryMetrics,
    /// Raw materials inventory metrics.
    RmInventoryMetrics,
    /// Work-in-progress inventory metrics.
    WipInventoryMetrics,
    /// Finished goods ineligible detail.
    FgIneligibleDetail,
    /// Sales and gross-margin trend.
    SalesGmTrend,
    /// Net orderly liquidation value table.
    NolvTable,
    /// Risk sub-factor scores.
    RiskSubfactors,
    /// Composite risk index.
    CompositeIndex,
    /// Forward-looking forecast rows.
    Forecast,
    /// Current week projected-vs-actual variance.
    CurrentWeekVariance,
    /// Cumulative projected-vs-actual variance.
    CumulativeVariance,
    /// User-maintained collateral rate limits (importer-free updates allowed).
    CollateralLimits,
}

impl RowFamily {
    /// Stable name used in import summaries and export sheet titles.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BorrowerOverview => "BorrowerOverview",
            Self::CollateralOverview => "CollateralOverview",
            Self::AgingComposition => "AgingComposition",
            Self::ArMetrics => "ArMetrics",
            Self::IneligibleTrend => "IneligibleTrend",
            Self::IneligibleOverview => "IneligibleOverview",
            Self::FgInventoryMetrics => "FgInventoryMetrics",
            Self::RmInventoryMetrics => "RmInventoryMetrics",
            Self::WipInventoryMetrics => "WipInventoryMetrics",
            Self::FgIneligibleDetail => "FgIneligibleDetail",
            Self::SalesGmTrend => "SalesGmTrend",
            Self::NolvTable => "NolvTable",
            Self::RiskSubfactors => "RiskSubfactors",
            Self::CompositeIndex => "CompositeIndex",
            Self::Forecast => "Forecast",
            Self::CurrentWeekVariance => "CurrentWeekVariance",
            Self::CumulativeVariance => "CumulativeVariance",
            Self::CollateralLimits => "CollateralLimits",
        }
    }
}

/// Header tokens that commonly appear in headers without being fields of a
/// specific family; they still count toward header-row detection.
const GENERIC_HEADER_TOKENS: &[&str] = &[
    "date",
    "category",
    "division",
    "customer",
    "total",
    "period",
    "week",
    "projected",
    "actual",
    "variance",
];

/// Column-group prefixes stripped when matching a normalized header against
/// a field ("Forecast NetSales" consumes the `net_sales` field).
const GROUP_PREFIXES: &[&str] = &["forecast", "actual", "budget"];

/// A workbook sheet mapped to a destination row family.
#[derive(Debug, Clone, Copy)]
pub struct SheetSchema {
    /// Workbook sheet name (lookup is case-insensitive and trims whitespace).
    pub sheet_name: &'static str,
    /// Destination row family.
    pub family: RowFamily,
    /// Typed fields consumed from normalized columns.
    pub fields: &'static [FieldSpec],
    /// Fixed header row index for sheets whose header is not detectable.
    pub header_hint: Option<usize>,
}

const INVENTORY_METRICS_FIELDS: &[FieldSpec] = &[
    text("inventory_type"),
    text("division"),
    date("as_of_date"),
    decimal("total_inventory"),
    decimal("ineligible_inventory"),
    decimal("available_inventory"),
    decimal("ineligible_pct_of_inventory"),
];

const VARIANCE_FIELDS: &[FieldSpec] = &[
    date("date"),
    text("category"),
    decimal("projected"),
    decimal("actual"),
    decimal("variance"),
    decimal("variance_pct"),
];

/// The sheet-to-model mapping, kept as configuration data.
pub const SHEET_SCHEMAS: &[SheetSchema] = &[
    SheetSchema {
        sheet_name: "Borrower Overview",
        family: RowFamily::BorrowerOverview,
        fields: &[
            text("company"),
            integer("company_id"),
            text("industry"),
            text("primary_naics"),
            text("website"),
            text("primary_contact"),
            text("primary_contact_phone"),
            text("primary_contact_email"),
            text("update_interval"),
            date("current_update"),
            date("previous_update"),
            date("next_update"),
            text("lender"),
            integer("lender_id"),
            text("specific_individual"),
            integer("specific_id"),
        ],
        header_hint: Some(1),
    },
    SheetSchema {
        sheet_name: "Collateral Overview",
        family: RowFamily::CollateralOverview,
        fields: &[
            text("main_type"),
            text("sub_type"),
            decimal("beginning_collateral"),
            decimal("ineligibles"),
            decimal("eligible_collateral"),
            decimal("nolv_pct"),
            decimal("dilution_rate"),
            decimal("advanced_rate"),
            decimal("rate_limit"),
            decimal("utilized_rate"),
            decimal("pre_reserve_collateral"),
            decimal("reserves"),
            decimal("net_collateral"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Aging Composition",
        family: RowFamily::AgingComposition,
        fields: &[
            text("division"),
            date("as_of_date"),
            text("bucket"),
            decimal("pct_of_total"),
            decimal("amount"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "AR_Metrics",
        family: RowFamily::ArMetrics,
        fields: &[
            text("division"),
            date("as_of_date"),
            decimal("balance"),
            decimal("dso"),
            decimal("pct_past_due"),
            decimal("current_amt"),
            decimal("past_due_amt"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Ineligible_Trend",
        family: RowFamily::IneligibleTrend,
        fields: &[
            date("date"),
            text("division"),
            decimal("total_ar"),
            decimal("total_ineligible"),
            decimal("ineligible_pct_of_ar"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Ineligible_Overview",
        family: RowFamily::IneligibleOverview,
        fields: &[
            date("date"),
            text("division"),
            decimal("past_due_gt_90_days"),
            decimal("dilution"),
            decimal("cross_age"),
            decimal("concentration_over_cap"),
            decimal("foreign_ar"),
            decimal("government"),
            decimal("intercompany"),
            decimal("contra"),
            decimal("other"),
            decimal("total_ineligible"),
            decimal("ineligible_pct_of_ar"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "FG_Inventory_Metrics",
        family: RowFamily::FgInventoryMetrics,
        fields: INVENTORY_METRICS_FIELDS,
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "RM_Inventory_Metrics",
        family: RowFamily::RmInventoryMetrics,
        fields: INVENTORY_METRICS_FIELDS,
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "WIP_Inventory_Metrics",
        family: RowFamily::WipInventoryMetrics,
        fields: INVENTORY_METRICS_FIELDS,
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "FG_Ineligible_detail",
        family: RowFamily::FgIneligibleDetail,
        fields: &[
            date("date"),
            text("inventory_type"),
            text("division"),
            decimal("slow_moving_obsolete"),
            decimal("aged"),
            decimal("off_site"),
            decimal("consigned"),
            decimal("in_transit"),
            decimal("damaged_non_saleable"),
            decimal("total_ineligible"),
            decimal("ineligible_pct_of_inventory"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Sales_GM_Trend",
        family: RowFamily::SalesGmTrend,
        fields: &[
            text("division"),
            date("as_of_date"),
            decimal("net_sales"),
            decimal("gross_margin_pct"),
            decimal("gross_margin_dollars"),
            decimal("ttm_sales"),
            decimal("ttm_sales_prior"),
            decimal("trend_ttm_pct"),
            decimal("ma3"),
            decimal("ma3_prior"),
            decimal("trend_3_m_pct"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "NOLV_Table",
        family: RowFamily::NolvTable,
        fields: &[
            date("date"),
            text("division"),
            text("line_item"),
            decimal("fg_usd"),
            decimal("fg_pct_cost"),
            decimal("rm_usd"),
            decimal("rm_pct_cost"),
            decimal("wip_usd"),
            decimal("wip_pct_cost"),
            decimal("total_usd"),
            decimal("total_pct_cost"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Risk_Subfactors",
        family: RowFamily::RiskSubfactors,
        fields: &[
            date("date"),
            text("main_category"),
            text("sub_risk"),
            decimal("risk_score"),
            text("high_impact_factor"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Composite_Index",
        family: RowFamily::CompositeIndex,
        fields: &[
            date("date"),
            decimal("overall_score"),
            decimal("ar_risk"),
            decimal("inventory_risk"),
            decimal("company_risk"),
            decimal("industry_risk"),
            decimal("weight_ar"),
            decimal("weight_inventory"),
            decimal("weight_company"),
            decimal("weight_industry"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Forecast",
        family: RowFamily::Forecast,
        fields: &[
            date("as_of_date"),
            date("period"),
            text("actual_forecast"),
            decimal("available_collateral"),
            decimal("loan_balance"),
            decimal("revolver_availability"),
            decimal("net_sales"),
            decimal("gross_margin_pct"),
            decimal("ar"),
            decimal("finished_goods"),
            decimal("raw_materials"),
            decimal("work_in_process"),
        ],
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Current Week Variance",
        family: RowFamily::CurrentWeekVariance,
        fields: VARIANCE_FIELDS,
        header_hint: None,
    },
    // The source workbook spells this sheet with the doubled "m".
    SheetSchema {
        sheet_name: "Cummulative Variance",
        family: RowFamily::CumulativeVariance,
        fields: VARIANCE_FIELDS,
        header_hint: None,
    },
    SheetSchema {
        sheet_name: "Collateral Limits",
        family: RowFamily::CollateralLimits,
        fields: &[
            text("division"),
            text("collateral_type"),
            text("collateral_sub_type"),
            decimal("usd_limit"),
            decimal("pct_limit"),
        ],
        header_hint: None,
    },
];

impl SheetSchema {
    /// Looks up a declared field by canonical name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Resolves a normalized header token to a declared field name, trying
    /// the token as-is first and then with a column-group prefix stripped.
    #[must_use]
    pub fn resolve_column(&self, token: &str) -> Option<&'static str> {
        if let Some(spec) = self.field(token) {
            return Some(spec.name);
        }
        for prefix in GROUP_PREFIXES {
            if let Some(stripped) = token.strip_prefix(&format!("{prefix}_")) {
                if let Some(spec) = self.field(stripped) {
                    return Some(spec.name);
                }
            }
        }
        None
    }

    /// Returns true when the token counts toward header-row detection.
    #[must_use]
    pub fn is_expected_token(&self, token: &str) -> bool {
        self.resolve_column(token).is_some() || GENERIC_HEADER_TOKENS.contains(&token)
    }
}

/// Looks up the schema for a workbook sheet name, tolerating inconsistent
/// casing and stray whitespace.
#[must_use]
pub fn schema_for_sheet(name: &str) -> Option<&'static SheetSchema> {
    let wanted = name.trim().to_lowercase();
    SHEET_SCHEMAS
        .iter()
        .find(|schema| schema.sheet_name.to_lowercase() == wanted)
}

/// Looks up the schema registered for a row family.
#[must_use]
pub fn schema_for_family(family: RowFamily) -> Option<&'static SheetSchema> {
    SHEET_SCHEMAS.iter().find(|schema| schema.family == family)
}

/// Row families persisted per report, in export order.
#[must_use]
pub fn report_families() -> Vec<RowFamily> {
    SHEET_SCHEMAS
        .iter()
        .map(|schema| schema.family)
        .filter(|family| *family != RowFamily::BorrowerOverview)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::normalize_header;

    #[test]
    fn test_sheet_lookup_tolerates_case_and_whitespace() {
        assert!(schema_for_sheet("Collateral Overview").is_some());
        assert!(schema_for_sheet("collateral overview").is_some());
        assert!(schema_for_sheet("  Collateral Limits  ").is_some());
        assert!(schema_for_sheet("Machinery & Equipment").is_none());
    }

    #[test]
    fn test_every_family_has_exactly_one_schema() {
        for schema in SHEET_SCHEMAS {
            assert_eq!(
                schema_for_family(schema.family).map(|s| s.sheet_name),
                Some(schema.sheet_name)
            );
        }
    }

    #[test]
    fn test_field_names_are_normalized_form() {
        // Registry field names must be fixed points of the normalizer,
        // otherwise a matching column could never be produced.
        for schema in SHEET_SCHEMAS {
            for spec in schema.fields {
                assert_eq!(
                    normalize_header(spec.name),
                    spec.name,
                    "{} field {} is not canonical",
                    schema.sheet_name,
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_resolve_column_strips_group_prefix() {
        let schema = schema_for_family(RowFamily::Forecast).unwrap();
        assert_eq!(schema.resolve_column("net_sales"), Some("net_sales"));
        assert_eq!(
            schema.resolve_column("forecast_net_sales"),
            Some("net_sales")
        );
        assert_eq!(schema.resolve_column("actual_net_sales"), Some("net_sales"));
        assert_eq!(schema.resolve_column("unknown_column"), None);
    }

    #[test]
    fn test_generic_tokens_count_as_expected() {
        let schema = schema_for_family(RowFamily::ArMetrics).unwrap();
        assert!(schema.is_expected_token("division"));
        assert!(schema.is_expected_token("total"));
        assert!(!schema.is_expected_token("random_noise"));
    }

    #[test]
    fn test_report_families_excludes_overview() {
        let families = report_families();
        assert!(!families.contains(&RowFamily::BorrowerOverview));
        assert!(families.contains(&RowFamily::CollateralOverview));
    }
}
