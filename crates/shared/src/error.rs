//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upload rejected before parsing began.
    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    /// Workbook could not be read or parsed.
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Import failed and was rolled back.
    #[error("Import failed: {0}")]
    ImportFailed(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) | Self::UploadRejected(_) => 400,
            Self::Workbook(_) | Self::ImportFailed(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UploadRejected(_) => "UPLOAD_REJECTED",
            Self::Workbook(_) => "WORKBOOK_ERROR",
            Self::ImportFailed(_) => "IMPORT_FAILED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::UploadRejected(String::new()).status_code(), 400);
        assert_eq!(AppError::Workbook(String::new()).status_code(), 422);
        assert_eq!(AppError::ImportFailed(String::new()).status_code(), 422);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Forbidden(String::new()).error_code(), "FORBIDDEN");
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::UploadRejected(String::new()).error_code(),
            "UPLOAD_REJECTED"
        );
        assert_eq!(
            AppError::ImportFailed(String::new()).error_code(),
            "IMPORT_FAILED"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::UploadRejected("bad extension".into()).to_string(),
            "Upload rejected: bad extension"
        );
        assert_eq!(
            AppError::ImportFailed("msg".into()).to_string(),
            "Import failed: msg"
        );
    }
}
