//! Durable report history.
//!
//! Every freshly built report is handed to a [`ReportStore`] without waiting
//! for it; storage failures are logged and never affect the caller.

mod pool;
mod sqlite;

use async_trait::async_trait;

use crate::error_handling::DatabaseError;
use crate::models::ValidationReport;

pub use pool::{init_db_pool_with_path, run_migrations};
pub use sqlite::SqliteReportStore;

/// Append-only sink for finished reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn append(&self, report: &ValidationReport) -> Result<(), DatabaseError>;
}
