//! # Grievances - Personal Grievance Tracker
//!
//! SQLite-backed record store and reporting engine for a small, single-user
//! grievance tracker.
//!
//! Grievances provides:
//! - A single persistent `grievances` table with explicit schema setup
//! - CRUD over [`GrievanceRecord`] with closed status/category/severity
//!   vocabularies enforced at the API boundary
//! - UTC timestamps at rest, Indian Standard Time (UTC+5:30) at display
//! - Dashboard aggregation: status histogram, category tally, totals

pub mod config;
pub mod record;
pub mod report;
pub mod storage;

// Re-exports for convenient access
pub use record::{Category, GrievanceRecord, NewGrievance, Severity, Status};
pub use report::{category_breakdown, status_breakdown, total_count, StatusBreakdown};
pub use storage::{GrievanceStore, Listing, SkippedRow};

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Grievance not found: {0}")]
    NotFound(i64),

    #[error("Malformed stored value: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
