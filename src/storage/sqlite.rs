//! SQLite storage implementation

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use super::schema;
use crate::record::{GrievanceRecord, NewGrievance, Status};
use crate::{Error, Result};

/// SQLite-backed store for grievance records.
///
/// Owns the single `grievances` table. Opening the store is the explicit
/// initialization step: schema creation is idempotent and runs once per
/// `open`, never as an import-time side effect. Single-writer, synchronous;
/// every operation is one transactional statement.
pub struct GrievanceStore {
    conn: Connection,
}

impl GrievanceStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Insert a new grievance with the default status.
    ///
    /// Validates before touching the database, so a rejected submission
    /// leaves no partial write. `created_at` is assigned by the engine.
    /// Returns the new record's id.
    pub fn create(&self, new: &NewGrievance) -> Result<i64> {
        new.validate(Utc::now().date_naive())?;

        self.conn.execute(
            r#"
            INSERT INTO grievances (title, details, category, severity, target_date, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                new.title,
                new.details,
                new.category.as_str(),
                new.severity.as_str(),
                new.target_date.format("%Y-%m-%d").to_string(),
                Status::default().as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch every record, most recent first (id breaks same-second ties).
    ///
    /// A row whose stored timestamp or target date no longer parses is
    /// skipped and flagged in [`Listing::skipped`] rather than aborting the
    /// whole listing; the store never fabricates a time for corrupted state.
    pub fn list_all(&self) -> Result<Listing> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, title, details, category, severity, status, resolution_notes, target_date
             FROM grievances ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(RawRow {
                id: row.get(0)?,
                created_at: row.get(1)?,
                title: row.get(2)?,
                details: row.get(3)?,
                category: row.get(4)?,
                severity: row.get(5)?,
                status: row.get(6)?,
                resolution_notes: row.get(7)?,
                target_date: row.get(8)?,
            })
        })?;

        let mut listing = Listing::default();
        for raw in rows {
            let raw = raw?;
            let id = raw.id;
            match raw.into_record() {
                Ok(record) => listing.records.push(record),
                Err(e) => listing.skipped.push(SkippedRow {
                    id,
                    reason: e.to_string(),
                }),
            }
        }
        Ok(listing)
    }

    /// Overwrite status and resolution notes as a single atomic transition.
    ///
    /// Taking [`Status`] keeps out-of-set values from ever reaching the
    /// table; unknown strings already fail at `Status::from_str`. A missing
    /// id is an explicit error, not a silent zero-row update.
    pub fn update(&self, id: i64, status: Status, notes: &str) -> Result<()> {
        let affected = self.conn.execute(
            r#"
            UPDATE grievances
            SET status = ?1, resolution_notes = ?2
            WHERE id = ?3
            "#,
            params![status.as_str(), notes, id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Permanently remove a record. Missing id is an explicit error.
    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM grievances WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Count all records
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM grievances", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Row as it comes off the wire, before stored text is interpreted
struct RawRow {
    id: i64,
    created_at: String,
    title: String,
    details: Option<String>,
    category: String,
    severity: String,
    status: String,
    resolution_notes: Option<String>,
    target_date: String,
}

impl RawRow {
    fn into_record(self) -> Result<GrievanceRecord> {
        Ok(GrievanceRecord {
            id: self.id,
            created_at: parse_stored_timestamp(&self.created_at)?,
            title: self.title,
            details: self.details,
            category: self.category,
            severity: self.severity,
            status: self.status,
            resolution_notes: self.resolution_notes,
            target_date: parse_stored_date(&self.target_date)?,
        })
    }
}

/// Parse the engine's `CURRENT_TIMESTAMP` text (`YYYY-MM-DD HH:MM:SS`, UTC)
fn parse_stored_timestamp(s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::Format(format!("Unparseable stored timestamp: {:?}", s)))
}

fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::Format(format!("Unparseable stored date: {:?}", s)))
}

/// Result of a full listing: parseable records plus flagged corrupt rows.
///
/// `skipped` is the partial-result warning channel; the caller decides how
/// loudly to surface it.
#[derive(Debug, Default)]
pub struct Listing {
    pub records: Vec<GrievanceRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// A row excluded from a listing because its stored state would not parse
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub id: i64,
    pub reason: String,
}
