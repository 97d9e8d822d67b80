//! Ingest error types.

use thiserror::Error;

/// Errors raised by workbook ingestion and export.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The workbook could not be opened or read.
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    /// The overview sheet is missing or malformed.
    #[error("overview sheet: {0}")]
    Overview(String),

    /// Writing the export workbook failed.
    #[error("failed to write workbook: {0}")]
    Export(String),

    /// Database error during export.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
