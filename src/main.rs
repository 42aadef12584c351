//! Grievances CLI - submission, listing and dashboard shell over the store
//!
//! The presentation layer: parses input, calls into [`GrievanceStore`] and
//! renders what comes back. All invariants live in the library.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chrono::NaiveDate;
use grievances::config;
use grievances::report;
use grievances::storage::GrievanceStore;
use grievances::{Category, NewGrievance, Severity, Status};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "grievances")]
#[command(version)]
#[command(about = "Personal grievance tracker - submit, manage and chart grievances")]
#[command(long_about = r#"
Grievances keeps a small local ledger of things worth talking about:
  • Submit a note with a category, severity and target date
  • List and update notes as they get worked through
  • A stats dashboard with status and category breakdowns

Example usage:
  grievances submit --title "Missing our morning texts" --category communication --severity mild
  grievances list
  grievances update --id 3 --status resolved --notes "talked it through"
  grievances stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file pinning the database location
    Init {
        /// Database path to record in the config
        #[arg(long, default_value = "grievances.db")]
        db_path: String,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Submit a new grievance
    Submit {
        /// Short description of the grievance
        #[arg(short, long)]
        title: String,

        /// Free-form elaboration
        #[arg(long)]
        details: Option<String>,

        /// Category (quality-time, communication, chores, appreciation,
        /// future-plans, annoyances, date-ideas, other)
        #[arg(short, long)]
        category: Category,

        /// Severity (mild, pressing, critical)
        #[arg(short, long)]
        severity: Severity,

        /// Target resolution date (YYYY-MM-DD, defaults to a week out)
        #[arg(long)]
        target_date: Option<NaiveDate>,
    },

    /// List every grievance, most recent first
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Update a grievance's status and resolution notes
    Update {
        /// Record id
        #[arg(short, long)]
        id: i64,

        /// New status (open, in-discussion, in-progress, resolved, deferred)
        #[arg(short, long)]
        status: Status,

        /// Resolution notes written alongside the status
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Delete a grievance permanently
    Delete {
        /// Record id
        #[arg(short, long)]
        id: i64,
    },

    /// Show the stats dashboard
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Submitted")]
    submitted: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if let Commands::Init { db_path, force } = &cli.command {
        let config_path = config::default_config_path();
        let cfg = config::GrievancesConfig {
            database: Some(db_path.clone()),
        };
        config::write_config(&config_path, &cfg, *force)?;
        println!("📝 Wrote {} (database: {})", config_path.display(), db_path);
        return Ok(());
    }

    let loaded = config::load_config(None)?;
    let db_path = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref());
    config::ensure_db_dir(&db_path)?;
    tracing::debug!("Using database {:?}", db_path);

    let store = GrievanceStore::open(&db_path)?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled before the store opens"),

        Commands::Submit { title, details, category, severity, target_date } => {
            let target_date = target_date
                .unwrap_or_else(|| chrono::Utc::now().date_naive() + chrono::Duration::days(7));
            let new = NewGrievance::new(title, details, category, severity, target_date);
            let id = store.create(&new)?;
            println!("💌 Noted as #{} ({}, {}, target {})", id, category, severity, target_date);
        }

        Commands::List { format } => {
            let listing = store.list_all()?;
            for skipped in &listing.skipped {
                tracing::warn!("Skipped row {}: {}", skipped.id, skipped.reason);
            }

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&listing.records)?);
            } else if listing.records.is_empty() {
                println!("∅ No grievances yet. All clear! 🥰");
            } else {
                let rows: Vec<ListRow> = listing
                    .records
                    .iter()
                    .map(|r| ListRow {
                        id: r.id,
                        submitted: r.submitted_on(),
                        title: r.title.clone(),
                        category: r.category.clone(),
                        severity: r.severity.clone(),
                        status: r.status_lossy().label().to_string(),
                        target: r.target_date.to_string(),
                        notes: r.resolution_notes.clone().unwrap_or_default(),
                    })
                    .collect();
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);
                if !listing.skipped.is_empty() {
                    println!("⚠️  {} row(s) skipped due to corrupted state", listing.skipped.len());
                }
            }
        }

        Commands::Update { id, status, notes } => {
            store.update(id, status, &notes)?;
            println!("✅ #{} updated to {}", id, status.label());
        }

        Commands::Delete { id } => {
            store.delete(id)?;
            println!("🗑️  #{} deleted", id);
        }

        Commands::Stats { format } => {
            let listing = store.list_all()?;
            for skipped in &listing.skipped {
                tracing::warn!("Skipped row {}: {}", skipped.id, skipped.reason);
            }

            let total = report::total_count(&listing.records);
            let breakdown = report::status_breakdown(&listing.records);
            let categories = report::category_breakdown(&listing.records);

            if format == "json" {
                let data = serde_json::json!({
                    "total": total,
                    "resolved": breakdown.resolved_count(),
                    "ongoing": breakdown.ongoing_count(),
                    "status_breakdown": breakdown,
                    "category_breakdown": categories,
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else if total == 0 {
                println!("∅ No grievances yet, nothing to chart. 🕊️");
            } else {
                println!("📊 Grievance Stats ({:?})", db_path);
                println!("------------------------------------");
                println!("Total: {}   Resolved: {}   Ongoing: {}", total, breakdown.resolved_count(), breakdown.ongoing_count());
                println!();
                println!("{}", breakdown);
                println!();
                println!("Category Insights:");
                for (category, count) in &categories {
                    println!("  {}: {}", category, count);
                }
            }
        }
    }

    Ok(())
}
