//! `SeaORM` Entity for the ineligible_overview table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ineligible_overview")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub borrower_id: i64,
    pub report_id: i64,
    pub date: Option<Date>,
    pub division: Option<String>,
    pub past_due_gt_90_days: Option<Decimal>,
    pub dilution: Option<Decimal>,
    pub cross_age: Option<Decimal>,
    pub concentration_over_cap: Option<Decimal>,
    pub foreign_ar: Option<Decimal>,
    pub government: Option<Decimal>,
    pub intercompany: Option<Decimal>,
    pub contra: Option<Decimal>,
    pub other: Option<Decimal>,
    pub total_ineligible: Option<Decimal>,
    pub ineligible_pct_of_ar: Option<Decimal>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::borrowers::Entity",
        from = "Column::BorrowerId",
        to = "super::borrowers::Column::Id"
    )]
    Borrowers,
    #[sea_orm(
        belongs_to = "super::borrower_reports::Entity",
        from = "Column::ReportId",
        to = "super::borrower_reports::Column::Id"
    )]
    BorrowerReports,
}

impl Related<super::borrowers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowers.def()
    }
}

impl Related<super::borrower_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BorrowerReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
