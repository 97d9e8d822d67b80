//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Ownership cascades (company → borrower → report → rows) are enforced
//! explicitly here rather than relied upon implicitly.

pub mod borrower;
pub mod dashboard;
pub mod export;
pub mod import;

pub use borrower::{BorrowerRepository, BorrowerSummaryRecord};
pub use dashboard::DashboardRepository;
pub use export::ExportRepository;
pub use import::{ImportError, ImportRepository, PersistOptions, PersistReceipt, SheetBatch};
