//! Database schema definitions

/// SQL to create the grievances table.
///
/// `created_at` is assigned by the engine at insertion, in UTC, and is never
/// written again. Vocabulary columns are plain TEXT; the closed sets are
/// enforced by the store's write paths, not by the engine.
pub const CREATE_GRIEVANCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS grievances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    title TEXT NOT NULL,
    details TEXT,
    category TEXT NOT NULL,
    severity TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    resolution_notes TEXT,
    target_date DATE NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_grievances_created ON grievances(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_grievances_status ON grievances(status)",
    "CREATE INDEX IF NOT EXISTS idx_grievances_category ON grievances(category)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_GRIEVANCES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
