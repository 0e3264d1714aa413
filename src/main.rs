// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pushup-Tracker CLI
//!
//! Syncs push-up activities from Strava into a local SQLite store and
//! reports streak and total statistics.

use chrono::Local;
use clap::{Parser, Subcommand};
use pushup_tracker::{
    config::{Config, StravaSecrets},
    db::Database,
    error::{AppError, Result},
    export,
    models::PushupStats,
    services::{RegexExtractor, StravaClient, SyncEngine},
    time_utils,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pushup-tracker", version, about = "Track push-up activities from Strava")]
struct Cli {
    /// Override the SQLite database path
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recent activities from Strava and store them
    Sync {
        /// Override the sync start date (ISO 8601, e.g. "2025-01-01T00:00:00+00:00")
        #[arg(long, value_name = "ISO8601")]
        start_date: Option<String>,
        /// Skip exporting the store to CSV after the sync
        #[arg(long)]
        no_export_csv: bool,
    },
    /// Print yearly/monthly/weekly totals and the current streak
    Stats,
    /// Export all stored activities to CSV
    Export {
        /// Output file path (defaults to the configured CSV path)
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(db_path) = &cli.db {
        config.database_path = db_path.clone();
    }

    match cli.command {
        Commands::Sync {
            start_date,
            no_export_csv,
        } => {
            let start = match &start_date {
                Some(raw) => Some(time_utils::parse_timestamp(raw).ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!("invalid --start-date: {}", raw))
                })?),
                None => None,
            };

            let secrets = StravaSecrets::from_env()?;
            let db = Database::connect(&config.database_path).await?;
            let client = StravaClient::new(secrets.client_id.clone(), secrets.client_secret.clone());
            let engine = SyncEngine::new(
                client,
                db.clone(),
                Box::new(RegexExtractor::new()),
                &config.activity_keyword,
            );

            let report = engine.run(&secrets.refresh_token, start).await?;
            println!(
                "Sync complete: {} created, {} updated, {} skipped",
                report.created, report.updated, report.skipped
            );
            if report.rate_limited {
                println!("Strava API rate limit exceeded. Stopped early.");
            }

            if !no_export_csv {
                let rows = export::write_activities_csv(&db, &config.csv_path).await?;
                println!("Exported {} activities to {}", rows, config.csv_path);
            }
        }
        Commands::Stats => {
            let db = Database::connect(&config.database_path).await?;
            let records = db.list_activities().await?;
            if records.is_empty() {
                println!("No data found in database.");
                return Ok(());
            }

            let stats = PushupStats::from_records(&records, Local::now().date_naive());
            print_stats(&stats);
        }
        Commands::Export { output } => {
            let db = Database::connect(&config.database_path).await?;
            let path = output.unwrap_or(config.csv_path);
            let rows = export::write_activities_csv(&db, &path).await?;
            println!("Exported {} activities to {}", rows, path);
        }
    }

    Ok(())
}

fn print_stats(stats: &PushupStats) {
    println!("Current streak: {} days", stats.streak);

    println!("\nYearly totals:");
    for (year, total) in &stats.yearly {
        println!("  {}: {}", year, total);
    }

    println!("\nMonthly totals:");
    for (month, total) in &stats.monthly {
        println!("  {}: {}", month, total);
    }

    println!("\nWeekly totals (last 52 weeks):");
    let weeks: Vec<_> = stats.weekly.iter().collect();
    let start = weeks.len().saturating_sub(52);
    for (week, total) in &weeks[start..] {
        println!("  week of {}: {}", week, total);
    }
}

/// Initialize logging with an env-filter; defaults to info level for the
/// crate, RUST_LOG overrides.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pushup_tracker=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
