//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - grievances(id, created_at, title, details, category, severity, status,
//!   resolution_notes, target_date)

pub mod schema;
pub mod sqlite;

pub use sqlite::{GrievanceStore, Listing, SkippedRow};
