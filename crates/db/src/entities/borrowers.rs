//! `SeaORM` Entity for the borrowers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "borrowers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub company_id: i64,
    /// Unique together with `company_id`.
    pub primary_contact: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub primary_contact_email: Option<String>,
    pub update_interval: Option<String>,
    pub current_update: Option<Date>,
    pub previous_update: Option<Date>,
    pub next_update: Option<Date>,
    pub lender: Option<String>,
    pub lender_id: Option<i64>,
    pub primary_specific_individual_id: Option<i64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
    #[sea_orm(has_many = "super::borrower_reports::Entity")]
    BorrowerReports,
    #[sea_orm(has_many = "super::specific_individuals::Entity")]
    SpecificIndividuals,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::borrower_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BorrowerReports.def()
    }
}

impl Related<super::specific_individuals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpecificIndividuals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
