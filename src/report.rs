//! Reporting - dashboard aggregates derived from the current record set
//!
//! Pure read-side computation, no persisted state of its own. Status uses a
//! fixed five-bucket domain (every status appears even at zero, so a chart
//! always shows all buckets); category is a sparse tally over observed
//! values. The asymmetry is deliberate.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{GrievanceRecord, Status};

/// Fixed-domain status histogram.
///
/// Always carries exactly the closed set of status keys. Records whose
/// stored status falls outside the set bind to the first member via
/// `Status::parse_lossy`, so the bucket sum always equals the record count.
#[derive(Debug, Clone, Serialize)]
pub struct StatusBreakdown {
    counts: BTreeMap<Status, u64>,
}

impl StatusBreakdown {
    /// Count for one status bucket
    pub fn count(&self, status: Status) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Records in the single resolved state
    pub fn resolved_count(&self) -> u64 {
        self.count(Status::Resolved)
    }

    /// Everything not resolved, including out-of-set stragglers
    pub fn ongoing_count(&self) -> u64 {
        self.total() - self.resolved_count()
    }

    /// Sum across all buckets; equals the input record count
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Buckets in canonical status order
    pub fn iter(&self) -> impl Iterator<Item = (Status, u64)> + '_ {
        Status::all().iter().map(|s| (*s, self.count(*s)))
    }
}

impl std::fmt::Display for StatusBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Status Breakdown:")?;
        for (status, count) in self.iter() {
            writeln!(f, "  {}: {}", status.label(), count)?;
        }
        writeln!(f, "  Resolved: {}", self.resolved_count())?;
        write!(f, "  Ongoing: {}", self.ongoing_count())
    }
}

/// Tally records into the fixed status domain
pub fn status_breakdown(records: &[GrievanceRecord]) -> StatusBreakdown {
    let mut counts: BTreeMap<Status, u64> =
        Status::all().iter().map(|s| (*s, 0)).collect();
    for record in records {
        *counts.entry(record.status_lossy()).or_insert(0) += 1;
    }
    StatusBreakdown { counts }
}

/// Sparse tally over observed category text; absent categories are absent
pub fn category_breakdown(records: &[GrievanceRecord]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// Cardinality of the record set
pub fn total_count(records: &[GrievanceRecord]) -> u64 {
    records.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Category, Severity};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(id: i64, category: Category, status: &str) -> GrievanceRecord {
        GrievanceRecord {
            id,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            title: format!("grievance {}", id),
            details: None,
            category: category.as_str().to_string(),
            severity: Severity::Mild.as_str().to_string(),
            status: status.to_string(),
            resolution_notes: None,
            target_date: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
        }
    }

    #[test]
    fn test_empty_record_set() {
        let records: Vec<GrievanceRecord> = Vec::new();
        assert_eq!(total_count(&records), 0);

        let breakdown = status_breakdown(&records);
        assert_eq!(breakdown.total(), 0);
        for status in Status::all() {
            assert_eq!(breakdown.count(*status), 0);
        }
        assert_eq!(breakdown.iter().count(), 5);

        assert!(category_breakdown(&records).is_empty());
    }

    #[test]
    fn test_histogram_has_all_five_keys_and_sums_to_total() {
        let records = vec![
            record(1, Category::Chores, "open"),
            record(2, Category::Chores, "resolved"),
            record(3, Category::Other, "in-progress"),
        ];
        let breakdown = status_breakdown(&records);
        assert_eq!(breakdown.iter().count(), 5);
        assert_eq!(breakdown.total(), total_count(&records));
        assert_eq!(breakdown.count(Status::Open), 1);
        assert_eq!(breakdown.count(Status::Resolved), 1);
        assert_eq!(breakdown.count(Status::InProgress), 1);
        assert_eq!(breakdown.count(Status::InDiscussion), 0);
        assert_eq!(breakdown.count(Status::Deferred), 0);
    }

    #[test]
    fn test_resolved_ongoing_split_with_out_of_set_status() {
        let records = vec![
            record(1, Category::Chores, "resolved"),
            record(2, Category::Chores, "open"),
            record(3, Category::Other, "vaporized"),
        ];
        let breakdown = status_breakdown(&records);
        assert_eq!(breakdown.resolved_count(), 1);
        // Out-of-set status is ongoing by virtue of not being resolved
        assert_eq!(breakdown.ongoing_count(), 2);
        assert_eq!(
            breakdown.resolved_count() + breakdown.ongoing_count(),
            total_count(&records)
        );
        // And it binds to the first bucket, keeping the histogram total honest
        assert_eq!(breakdown.count(Status::Open), 2);
        assert_eq!(breakdown.total(), 3);
    }

    #[test]
    fn test_category_tally_is_sparse() {
        let records = vec![
            record(1, Category::Chores, "open"),
            record(2, Category::Chores, "open"),
            record(3, Category::Communication, "open"),
        ];
        let counts = category_breakdown(&records);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[Category::Chores.as_str()], 2);
        assert_eq!(counts[Category::Communication.as_str()], 1);
        assert!(!counts.contains_key(Category::DateIdeas.as_str()));
    }

    #[test]
    fn test_two_record_scenario() {
        // Before any update: two open records
        let mut a = record(1, Category::Communication, "open");
        let b = record(2, Category::Chores, "open");

        let before = status_breakdown(&[a.clone(), b.clone()]);
        assert_eq!(before.count(Status::Open), 2);
        assert_eq!(before.total(), 2);
        assert_eq!(before.resolved_count(), 0);
        assert_eq!(before.ongoing_count(), 2);

        // Resolve A with notes
        a.status = Status::Resolved.as_str().to_string();
        a.resolution_notes = Some("fixed".to_string());

        let after = status_breakdown(&[a, b]);
        assert_eq!(after.count(Status::Open), 1);
        assert_eq!(after.count(Status::Resolved), 1);
        assert_eq!(after.resolved_count(), 1);
        assert_eq!(after.ongoing_count(), 1);
        assert_eq!(after.total(), 2);
    }
}
