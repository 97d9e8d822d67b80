//! `SeaORM` Entity for the forecast table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forecast")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub borrower_id: i64,
    pub report_id: i64,
    pub as_of_date: Option<Date>,
    pub period: Option<Date>,
    pub actual_forecast: Option<String>,
    pub available_collateral: Option<Decimal>,
    pub loan_balance: Option<Decimal>,
    pub revolver_availability: Option<Decimal>,
    pub net_sales: Option<Decimal>,
    pub gross_margin_pct: Option<Decimal>,
    pub ar: Option<Decimal>,
    pub finished_goods: Option<Decimal>,
    pub raw_materials: Option<Decimal>,
    pub work_in_process: Option<Decimal>,
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
