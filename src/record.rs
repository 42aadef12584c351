//! Record types - the grievance entity and its closed vocabularies
//!
//! A grievance carries three enumerated text fields:
//! - `Category` (8 values): what the grievance is about
//! - `Severity` (3 values): how urgent it feels
//! - `Status` (5 values): where it sits in its lifecycle
//!
//! The enums own the closed sets; the persisted record keeps the raw stored
//! text so that externally tampered rows never crash a read. `Status` is the
//! only vocabulary with a lossy parse: unrecognized text binds to the first
//! member (`Open`) wherever an index into the closed set is needed.

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display time zone for timestamps: Indian Standard Time, UTC+5:30.
///
/// Storage stays UTC; this only affects rendering.
pub fn display_zone() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range")
}

/// Lifecycle status of a grievance - closed set of five values.
///
/// Declaration order is canonical: `Open` is the default assigned at
/// creation and the fallback for unrecognized stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Freshly submitted, not yet discussed
    Open,
    /// Being talked through
    InDiscussion,
    /// Actively being worked on
    InProgress,
    /// Settled - the single terminal "done" state
    Resolved,
    /// Parked for later
    Deferred,
}

impl Status {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InDiscussion => "in-discussion",
            Status::InProgress => "in-progress",
            Status::Resolved => "resolved",
            Status::Deferred => "deferred",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InDiscussion => "In Discussion",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
            Status::Deferred => "Deferred",
        }
    }

    /// All status values, in canonical order
    pub fn all() -> &'static [Status] {
        &[
            Status::Open,
            Status::InDiscussion,
            Status::InProgress,
            Status::Resolved,
            Status::Deferred,
        ]
    }

    /// Parse stored text, falling back to the first member for anything
    /// outside the closed set. Tampered rows must not crash lookups.
    pub fn parse_lossy(s: &str) -> Status {
        s.parse().unwrap_or(Status::Open)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Open
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in-discussion" | "discussion" | "talking" => Ok(Status::InDiscussion),
            "in-progress" | "progress" | "working" => Ok(Status::InProgress),
            "resolved" | "done" | "closed" => Ok(Status::Resolved),
            "deferred" | "parked" | "pending" => Ok(Status::Deferred),
            _ => Err(Error::Validation(format!("Unknown status: {}", s))),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a grievance relates to - closed set of eight values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    QualityTime,
    Communication,
    Chores,
    Appreciation,
    FuturePlans,
    Annoyances,
    DateIdeas,
    Other,
}

impl Category {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::QualityTime => "quality-time",
            Category::Communication => "communication",
            Category::Chores => "chores",
            Category::Appreciation => "appreciation",
            Category::FuturePlans => "future-plans",
            Category::Annoyances => "annoyances",
            Category::DateIdeas => "date-ideas",
            Category::Other => "other",
        }
    }

    /// All category values
    pub fn all() -> &'static [Category] {
        &[
            Category::QualityTime,
            Category::Communication,
            Category::Chores,
            Category::Appreciation,
            Category::FuturePlans,
            Category::Annoyances,
            Category::DateIdeas,
            Category::Other,
        ]
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "quality-time" | "time" => Ok(Category::QualityTime),
            "communication" => Ok(Category::Communication),
            "chores" | "responsibilities" => Ok(Category::Chores),
            "appreciation" | "affection" => Ok(Category::Appreciation),
            "future-plans" | "plans" => Ok(Category::FuturePlans),
            "annoyances" => Ok(Category::Annoyances),
            "date-ideas" | "dates" => Ok(Category::DateIdeas),
            "other" | "misc" => Ok(Category::Other),
            _ => Err(Error::Validation(format!("Unknown category: {}", s))),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How hard a grievance tugs - closed set of three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Mild,
    Pressing,
    Critical,
}

impl Severity {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Pressing => "pressing",
            Severity::Critical => "critical",
        }
    }

    /// All severity values
    pub fn all() -> &'static [Severity] {
        &[Severity::Mild, Severity::Pressing, Severity::Critical]
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mild" | "low" => Ok(Severity::Mild),
            "pressing" | "medium" | "prompt" => Ok(Severity::Pressing),
            "critical" | "high" | "emergency" => Ok(Severity::Critical),
            _ => Err(Error::Validation(format!("Unknown severity: {}", s))),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted grievance.
///
/// `category`, `severity` and `status` hold the raw stored text. The closed
/// sets are enforced on the write path; on the read path the record reports
/// whatever the row holds, so tampered values surface instead of crashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrievanceRecord {
    /// Auto-assigned primary key, stable for the record's lifetime
    pub id: i64,
    /// Creation instant in UTC, set once by the storage engine
    pub created_at: DateTime<Utc>,
    /// Short description, never empty
    pub title: String,
    /// Free-form elaboration
    pub details: Option<String>,
    /// Stored category text (closed set at creation)
    pub category: String,
    /// Stored severity text (closed set at creation)
    pub severity: String,
    /// Stored status text (closed set on update)
    pub status: String,
    /// Notes written alongside status changes
    pub resolution_notes: Option<String>,
    /// Desired resolution date
    pub target_date: NaiveDate,
}

impl GrievanceRecord {
    /// Typed view of the stored status, falling back to `Open` for
    /// unrecognized text.
    pub fn status_lossy(&self) -> Status {
        Status::parse_lossy(&self.status)
    }

    /// True once the grievance reached the resolved state
    pub fn is_resolved(&self) -> bool {
        self.status == Status::Resolved.as_str()
    }

    /// Creation instant rendered in the display zone (IST) as
    /// `YYYY-MM-DD HH:MM`. Read-only formatting; storage stays UTC.
    pub fn submitted_on(&self) -> String {
        self.created_at
            .with_timezone(&display_zone())
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

impl PartialEq for GrievanceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GrievanceRecord {}

/// Fields supplied by the submission form when creating a grievance.
///
/// Category and severity are typed, so out-of-set values cannot reach the
/// store. Title and target date are validated by [`NewGrievance::validate`].
#[derive(Debug, Clone)]
pub struct NewGrievance {
    pub title: String,
    pub details: Option<String>,
    pub category: Category,
    pub severity: Severity,
    pub target_date: NaiveDate,
}

impl NewGrievance {
    pub fn new(
        title: impl Into<String>,
        details: Option<String>,
        category: Category,
        severity: Severity,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            details,
            category,
            severity,
            target_date,
        }
    }

    /// Check creation constraints against the submission date:
    /// non-empty title, target date not in the past.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title must not be empty".to_string()));
        }
        if self.target_date < today {
            return Err(Error::Validation(format!(
                "Target date {} is before the submission date {}",
                self.target_date, today
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in Status::all() {
            let s = status.as_str();
            let parsed: Status = s.parse().unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_status_aliases() {
        assert_eq!(Status::from_str("done").unwrap(), Status::Resolved);
        assert_eq!(Status::from_str("talking").unwrap(), Status::InDiscussion);
        assert_eq!(Status::from_str("working").unwrap(), Status::InProgress);
        assert_eq!(Status::from_str("parked").unwrap(), Status::Deferred);
    }

    #[test]
    fn test_status_unknown_rejected() {
        assert!(Status::from_str("vaporized").is_err());
    }

    #[test]
    fn test_status_lossy_falls_back_to_first() {
        assert_eq!(Status::parse_lossy("resolved"), Status::Resolved);
        assert_eq!(Status::parse_lossy("vaporized"), Status::Open);
        assert_eq!(Status::parse_lossy(""), Status::Open);
        assert_eq!(Status::all()[0], Status::Open);
    }

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(Status::all().len(), 5);
        assert_eq!(Category::all().len(), 8);
        assert_eq!(Severity::all().len(), 3);
    }

    #[test]
    fn test_category_severity_roundtrip() {
        for category in Category::all() {
            assert_eq!(*category, category.as_str().parse().unwrap());
        }
        for severity in Severity::all() {
            assert_eq!(*severity, severity.as_str().parse().unwrap());
        }
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let new = NewGrievance::new("   ", None, Category::Other, Severity::Mild, today);
        assert!(new.validate(today).is_err());
    }

    #[test]
    fn test_validate_rejects_past_target_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let new = NewGrievance::new("morning texts", None, Category::Communication, Severity::Mild, yesterday);
        assert!(new.validate(today).is_err());
        let ok = NewGrievance::new("morning texts", None, Category::Communication, Severity::Mild, today);
        assert!(ok.validate(today).is_ok());
    }

    #[test]
    fn test_submitted_on_renders_in_ist() {
        let record = GrievanceRecord {
            id: 1,
            created_at: DateTime::parse_from_rfc3339("2025-06-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            title: "test".to_string(),
            details: None,
            category: Category::Other.as_str().to_string(),
            severity: Severity::Mild.as_str().to_string(),
            status: Status::Open.as_str().to_string(),
            resolution_notes: None,
            target_date: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
        };
        // 10:00 UTC is 15:30 IST
        assert_eq!(record.submitted_on(), "2025-06-01 15:30");
    }
}
