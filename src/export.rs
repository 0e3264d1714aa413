// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export of the stored activities.

use crate::db::Database;
use crate::error::{AppError, Result};

const CSV_HEADER: [&str; 7] = [
    "strava_activity_id",
    "name",
    "start_date",
    "elapsed_time",
    "count",
    "avg_time",
    "calories",
];

/// Write every stored activity to `path`, header row first, ascending by
/// start date.
pub async fn write_activities_csv(db: &Database, path: &str) -> Result<usize> {
    let records = db.list_activities().await?;

    let mut writer =
        csv::Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| AppError::Export(e.to_string()))?;

    for record in &records {
        writer
            .write_record(&[
                record.strava_activity_id.to_string(),
                record.name.clone(),
                record.start_date.clone(),
                record.elapsed_time.to_string(),
                record.count.to_string(),
                record.avg_time.to_string(),
                record.calories.to_string(),
            ])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    writer.flush().map_err(|e| AppError::Export(e.to_string()))?;
    tracing::info!(path, rows = records.len(), "Wrote CSV export");
    Ok(records.len())
}
