//! `SeaORM` Entity for the collateral_limits table.
//!
//! Unlike the report-scoped row tables, limits are borrower-scoped and
//! mutable: they can arrive from an import or be edited directly.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collateral_limits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub borrower_id: i64,
    pub division: Option<String>,
    pub collateral_type: Option<String>,
    pub collateral_sub_type: Option<String>,
    pub usd_limit: Option<Decimal>,
    pub pct_limit: Option<Decimal>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::borrowers::Entity",
        from = "Column::BorrowerId",
        to = "super::borrowers::Column::Id"
    )]
    Borrowers,
}

impl Related<super::borrowers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
