//! Borrower and company repository.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use lendview_core::access::BorrowerRef;

use crate::entities::{
    aging_composition, ar_metrics, borrower_overview, borrower_reports, borrowers,
    collateral_limits, collateral_overview, companies, composite_index, cumulative_variance,
    current_week_variance, fg_ineligible_detail, fg_inventory_metrics, forecast,
    ineligible_overview, ineligible_trend, nolv_table, risk_subfactors, rm_inventory_metrics,
    sales_gm_trend, specific_individuals, wip_inventory_metrics,
};

/// One row of the borrower listing.
#[derive(Debug, Clone)]
pub struct BorrowerSummaryRecord {
    /// Borrower id.
    pub id: i64,
    /// Owning company id.
    pub company_id: i64,
    /// Company display name.
    pub company_name: Option<String>,
    /// Primary contact name.
    pub primary_contact: Option<String>,
}

/// Repository for borrower and company lookups and lifecycle.
#[derive(Debug, Clone)]
pub struct BorrowerRepository {
    db: DatabaseConnection,
}

impl BorrowerRepository {
    /// Creates a new borrower repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the minimal borrower identity used by the access policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_ref(&self, borrower_id: i64) -> Result<Option<BorrowerRef>, DbErr> {
        let borrower = borrowers::Entity::find_by_id(borrower_id)
            .one(&self.db)
            .await?;
        Ok(borrower.map(|b| BorrowerRef {
            id: b.id,
            company_id: b.company_id,
        }))
    }

    /// Lists borrowers with their company names, ordered for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<BorrowerSummaryRecord>, DbErr> {
        let rows = borrowers::Entity::find()
            .find_also_related(companies::Entity)
            .order_by_asc(borrowers::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(borrower, company)| BorrowerSummaryRecord {
                id: borrower.id,
                company_id: borrower.company_id,
                company_name: company.and_then(|c| c.name),
                primary_contact: borrower.primary_contact,
            })
            .collect())
    }

    /// Stores a hashed portal credential on a company.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the update fails.
    pub async fn set_company_credential(
        &self,
        company_pk: i64,
        plaintext: &str,
    ) -> Result<(), DbErr> {
        let hash = lendview_core::credential::hash_credential(plaintext)
            .map_err(|err| DbErr::Custom(err.to_string()))?;
        let Some(company) = companies::Entity::find_by_id(company_pk).one(&self.db).await? else {
            return Err(DbErr::RecordNotFound(format!("company {company_pk}")));
        };
        let mut update: companies::ActiveModel = company.into();
        update.password_hash = sea_orm::Set(Some(hash));
        update.updated_at = sea_orm::Set(chrono::Utc::now().naive_utc());
        companies::Entity::update(update).exec(&self.db).await?;
        Ok(())
    }

    /// Verifies a plaintext portal credential against the stored hash.
    /// Companies without a stored credential never verify.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn verify_company_credential(
        &self,
        company_pk: i64,
        plaintext: &str,
    ) -> Result<bool, DbErr> {
        let company = companies::Entity::find_by_id(company_pk).one(&self.db).await?;
        let Some(hash) = company.and_then(|c| c.password_hash) else {
            return Ok(false);
        };
        Ok(lendview_core::credential::verify_credential(plaintext, &hash).unwrap_or(false))
    }

    /// Deletes a borrower and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails; the transaction rolls back.
    pub async fn delete_borrower(&self, borrower_id: i64) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;
        delete_borrower_rows(&txn, borrower_id).await?;
        borrowers::Entity::delete_by_id(borrower_id)
            .exec(&txn)
            .await?;
        txn.commit().await
    }

    /// Deletes a company, its borrowers, and everything they own.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails; the transaction rolls back.
    pub async fn delete_company(&self, company_pk: i64) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;
        let owned = borrowers::Entity::find()
            .filter(borrowers::Column::CompanyId.eq(company_pk))
            .all(&txn)
            .await?;
        for borrower in owned {
            delete_borrower_rows(&txn, borrower.id).await?;
            borrowers::Entity::delete_by_id(borrower.id)
                .exec(&txn)
                .await?;
        }
        companies::Entity::delete_by_id(company_pk).exec(&txn).await?;
        txn.commit().await
    }
}

/// Explicitly deletes the imported row collections a borrower owns, then
/// its reports. The schema declares the same cascades, but ownership is
/// enforced here rather than left to the storage engine. Named individuals
/// survive; they are borrower metadata, not imported data.
pub(crate) async fn delete_imported_rows(
    txn: &DatabaseTransaction,
    borrower_id: i64,
) -> Result<(), DbErr> {
    macro_rules! delete_family {
        ($entity:ident) => {
            $entity::Entity::delete_many()
                .filter($entity::Column::BorrowerId.eq(borrower_id))
                .exec(txn)
                .await?;
        };
    }

    delete_family!(borrower_overview);
    delete_family!(collateral_overview);
    delete_family!(aging_composition);
    delete_family!(ar_metrics);
    delete_family!(ineligible_trend);
    delete_family!(ineligible_overview);
    delete_family!(fg_inventory_metrics);
    delete_family!(rm_inventory_metrics);
    delete_family!(wip_inventory_metrics);
    delete_family!(fg_ineligible_detail);
    delete_family!(sales_gm_trend);
    delete_family!(nolv_table);
    delete_family!(risk_subfactors);
    delete_family!(composite_index);
    delete_family!(forecast);
    delete_family!(current_week_variance);
    delete_family!(cumulative_variance);
    delete_family!(collateral_limits);
    delete_family!(borrower_reports);

    Ok(())
}

/// Deletes everything a borrower owns, including named individuals.
pub(crate) async fn delete_borrower_rows(
    txn: &DatabaseTransaction,
    borrower_id: i64,
) -> Result<(), DbErr> {
    delete_imported_rows(txn, borrower_id).await?;
    specific_individuals::Entity::delete_many()
        .filter(specific_individuals::Column::BorrowerId.eq(borrower_id))
        .exec(txn)
        .await?;
    Ok(())
}
