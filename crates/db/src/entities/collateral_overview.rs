//! `SeaORM` Entity for the collateral_overview table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collateral_overview")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub borrower_id: i64,
    pub report_id: i64,
    pub main_type: Option<String>,
    pub sub_type: Option<String>,
    pub beginning_collateral: Option<Decimal>,
    pub ineligibles: Option<Decimal>,
    pub eligible_collateral: Option<Decimal>,
    pub nolv_pct: Option<Decimal>,
    pub dilution_rate: Option<Decimal>,
    pub advanced_rate: Option<Decimal>,
    pub rate_limit: Option<Decimal>,
    pub utilized_rate: Option<Decimal>,
    pub pre_reserve_collateral: Option<Decimal>,
    pub reserves: Option<Decimal>,
    pub net_collateral: Option<Decimal>,
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
