//! SQLite cache for report transcripts and generated summaries

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::config::Settings;
use crate::storage::models::{Quarter, Report, ReportMeta, Summary};

/// Database wrapper for earnest
pub struct Database {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

impl Database {
    /// Open or create the database at the configured location
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        // Enable foreign keys so summaries follow their report on delete
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}",
                current_version,
                CURRENT_SCHEMA_VERSION
            );
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute(&format!("PRAGMA user_version = {}", version), [])?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                id INTEGER PRIMARY KEY,
                company TEXT NOT NULL,
                quarter TEXT NOT NULL,
                year INTEGER NOT NULL,
                report_text TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                UNIQUE(company, quarter, year)
            );

            CREATE INDEX IF NOT EXISTS idx_reports_created_at
                ON reports(created_at DESC);

            CREATE TABLE IF NOT EXISTS summaries (
                id INTEGER PRIMARY KEY,
                report_id INTEGER NOT NULL,
                summary_text TEXT NOT NULL,
                model TEXT,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (report_id) REFERENCES reports(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_summaries_report_id
                ON summaries(report_id);
            "#,
        )?;

        Ok(())
    }

    /// Insert a new report. Returns `None` when a report for the same
    /// (company, quarter, year) is already cached.
    pub fn insert_report(
        &self,
        company: &str,
        quarter: Quarter,
        year: i32,
        text: &str,
    ) -> Result<Option<i64>> {
        let result = self.conn.execute(
            r#"
            INSERT INTO reports (company, quarter, year, report_text, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![company, quarter.as_str(), year, text, Utc::now().timestamp()],
        );

        match result {
            Ok(_) => Ok(Some(self.conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a cached report by its natural key
    pub fn get_report(&self, company: &str, quarter: Quarter, year: i32) -> Result<Option<Report>> {
        let report = self
            .conn
            .query_row(
                "SELECT id, company, quarter, year, report_text, created_at
                 FROM reports
                 WHERE company = ?1 AND quarter = ?2 AND year = ?3",
                params![company, quarter.as_str(), year],
                Self::row_to_report,
            )
            .optional()?;

        Ok(report)
    }

    /// Store a summary for a report
    pub fn insert_summary(&self, report_id: i64, text: &str, model: Option<&str>) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO summaries (report_id, summary_text, model, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![report_id, text, model, Utc::now().timestamp()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Newest summary for a report, if any
    pub fn get_summary(&self, report_id: i64) -> Result<Option<Summary>> {
        let summary = self
            .conn
            .query_row(
                "SELECT id, report_id, summary_text, model, created_at
                 FROM summaries
                 WHERE report_id = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1",
                params![report_id],
                |row| {
                    Ok(Summary {
                        id: row.get(0)?,
                        report_id: row.get(1)?,
                        text: row.get(2)?,
                        model: row.get(3)?,
                        created_at: Utc.timestamp_opt(row.get(4)?, 0).unwrap(),
                    })
                },
            )
            .optional()?;

        Ok(summary)
    }

    /// List cached reports, newest first
    pub fn list_reports(&self, limit: usize) -> Result<Vec<ReportMeta>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id, r.company, r.quarter, r.year, r.created_at,
                    EXISTS(SELECT 1 FROM summaries s WHERE s.report_id = r.id)
             FROM reports r
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT ?1",
        )?;

        let reports = stmt
            .query_map(params![limit], Self::row_to_report_meta)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reports)
    }

    /// List cached reports whose company name matches the query
    pub fn search_reports(&self, query: &str, limit: usize) -> Result<Vec<ReportMeta>> {
        let pattern = format!("%{}%", query);

        let mut stmt = self.conn.prepare(
            "SELECT r.id, r.company, r.quarter, r.year, r.created_at,
                    EXISTS(SELECT 1 FROM summaries s WHERE s.report_id = r.id)
             FROM reports r
             WHERE r.company LIKE ?1
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT ?2",
        )?;

        let reports = stmt
            .query_map(params![pattern, limit], Self::row_to_report_meta)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reports)
    }

    /// Delete a report and, via the cascade, its summaries. Returns
    /// whether a row existed.
    pub fn delete_report(&self, company: &str, quarter: Quarter, year: i32) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM reports WHERE company = ?1 AND quarter = ?2 AND year = ?3",
            params![company, quarter.as_str(), year],
        )?;

        Ok(deleted > 0)
    }

    // Row mapping helpers

    fn row_to_report(row: &rusqlite::Row) -> rusqlite::Result<Report> {
        Ok(Report {
            id: row.get(0)?,
            company: row.get(1)?,
            quarter: Self::column_to_quarter(row, 2)?,
            year: row.get(3)?,
            text: row.get(4)?,
            created_at: Utc.timestamp_opt(row.get(5)?, 0).unwrap(),
        })
    }

    fn row_to_report_meta(row: &rusqlite::Row) -> rusqlite::Result<ReportMeta> {
        Ok(ReportMeta {
            id: row.get(0)?,
            company: row.get(1)?,
            quarter: Self::column_to_quarter(row, 2)?,
            year: row.get(3)?,
            created_at: Utc.timestamp_opt(row.get(4)?, 0).unwrap(),
            has_summary: row.get(5)?,
        })
    }

    fn column_to_quarter(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Quarter> {
        let raw: String = row.get(idx)?;
        raw.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
    }
}
