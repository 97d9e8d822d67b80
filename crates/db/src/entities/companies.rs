//! `SeaORM` Entity for the companies table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External numeric company id, unique across tenants.
    #[sea_orm(unique)]
    pub company_id: i64,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub primary_naics: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    /// Argon2 hash of the optional portal credential.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::borrowers::Entity")]
    Borrowers,
}

impl Related<super::borrowers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
