//! SQLite-backed report history.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use sqlx::SqlitePool;

use super::pool::init_db_pool_with_path;
use super::ReportStore;
use crate::error_handling::DatabaseError;
use crate::models::ValidationReport;

/// Stores each report as a row in `schema_validation`, with the headline
/// numbers in columns and the full report as JSON.
#[derive(Clone)]
pub struct SqliteReportStore {
    pool: Arc<SqlitePool>,
}

impl SqliteReportStore {
    /// Opens (creating if needed) the database at `db_path`.
    pub async fn connect(db_path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: init_db_pool_with_path(db_path).await?,
        })
    }

    /// Uses a pool whose schema has already been created.
    pub fn from_pool(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Most recent reports first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ValidationReport>, DatabaseError> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT report_json FROM schema_validation ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter()
            .map(|json| serde_json::from_str(json).map_err(DatabaseError::from))
            .collect()
    }

    /// Most recent reports for one source, newest first.
    pub async fn history_for(
        &self,
        source: &str,
        limit: i64,
    ) -> Result<Vec<ValidationReport>, DatabaseError> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT report_json FROM schema_validation WHERE source = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(source)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter()
            .map(|json| serde_json::from_str(json).map_err(DatabaseError::from))
            .collect()
    }
}

#[async_trait]
impl ReportStore for SqliteReportStore {
    async fn append(&self, report: &ValidationReport) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(report)?;
        sqlx::query(
            "INSERT INTO schema_validation
                (source, schemas_found, overall_score, error_count, warning_count,
                 rich_snippet_count, report_json, validated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&report.source)
        .bind(report.schemas_found as i64)
        .bind(i64::from(report.overall_score))
        .bind(report.errors.len() as i64)
        .bind(report.warnings.len() as i64)
        .bind(report.rich_snippet_opportunities.len() as i64)
        .bind(json)
        .bind(report.validated_at.timestamp_millis())
        .execute(self.pool.as_ref())
        .await?;

        debug!("Stored validation report for {}", report.source);
        Ok(())
    }
}
