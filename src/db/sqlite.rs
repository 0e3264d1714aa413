// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite store with typed operations.
//!
//! One table, one row per Strava activity id. Schema upgrades are
//! strictly additive: new columns are added with `ALTER TABLE`, existing
//! columns are never renamed or dropped, so old databases keep working.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::error::Result;
use crate::models::activity::{ActivityRecord, NewActivity};
use crate::time_utils;

/// Full column set of the `activities` table, used for the additive
/// migration check. Order matches the CREATE TABLE statement.
const ACTIVITY_COLUMNS: &[(&str, &str)] = &[
    ("strava_activity_id", "INTEGER"),
    ("name", "TEXT NOT NULL DEFAULT ''"),
    ("start_date", "TEXT NOT NULL DEFAULT ''"),
    ("elapsed_time", "INTEGER NOT NULL DEFAULT 0"),
    ("count", "INTEGER NOT NULL DEFAULT 0"),
    ("avg_time", "REAL NOT NULL DEFAULT 0"),
    ("calories", "REAL NOT NULL DEFAULT 0"),
];

/// SQLite database client.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) and migrate the database at `path`.
    ///
    /// A single connection is used: sync and analytics are batch
    /// operations and never run concurrently against the same store.
    pub async fn connect(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(path, "Connected to SQLite database");
        Ok(db)
    }

    /// Create the schema if needed and apply additive column upgrades.
    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activities (
                strava_activity_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                start_date TEXT NOT NULL DEFAULT '',
                elapsed_time INTEGER NOT NULL DEFAULT 0,
                count INTEGER NOT NULL DEFAULT 0,
                avg_time REAL NOT NULL DEFAULT 0,
                calories REAL NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        self.add_missing_columns().await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activities_start_date ON activities(start_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Compare the live table against the expected column set and add
    /// whatever is missing.
    async fn add_missing_columns(&self) -> Result<()> {
        let rows = sqlx::query("PRAGMA table_info(activities)")
            .fetch_all(&self.pool)
            .await?;
        let existing: HashSet<String> = rows
            .iter()
            .filter_map(|row| row.try_get::<String, _>("name").ok())
            .collect();

        for (column, definition) in ACTIVITY_COLUMNS {
            if existing.contains(*column) {
                continue;
            }
            tracing::info!(column = *column, "Adding missing column to activities");
            sqlx::query(&format!(
                "ALTER TABLE activities ADD COLUMN {} {}",
                column, definition
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Insert the record if its id is unseen, otherwise update the
    /// mutable fields in place. Returns `true` when a new row was
    /// created.
    ///
    /// `start_date` and `elapsed_time` are facts of the original
    /// activity and are never touched on update.
    pub async fn upsert_activity(&self, activity: &NewActivity) -> Result<bool> {
        let updated = sqlx::query(
            r"
            UPDATE activities
            SET name = ?1, count = ?2, avg_time = ?3, calories = ?4
            WHERE strava_activity_id = ?5
            ",
        )
        .bind(&activity.name)
        .bind(activity.count)
        .bind(activity.avg_time)
        .bind(activity.calories)
        .bind(activity.strava_activity_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query(
            r"
            INSERT INTO activities
                (strava_activity_id, name, start_date, elapsed_time, count, avg_time, calories)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(activity.strava_activity_id)
        .bind(&activity.name)
        .bind(&activity.start_date)
        .bind(activity.elapsed_time)
        .bind(activity.count)
        .bind(activity.avg_time)
        .bind(activity.calories)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    /// The most recent `start_date` across all records, used to seed the
    /// next sync window. `None` when the store is empty or the stored
    /// maximum does not parse (harmless: the next sync just re-fetches).
    pub async fn latest_start_date(&self) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT MAX(start_date) FROM activities")
                .fetch_one(&self.pool)
                .await?;

        Ok(raw.and_then(|value| {
            let parsed = time_utils::parse_timestamp(&value);
            if parsed.is_none() {
                tracing::warn!(start_date = %value, "Stored start date is unparseable");
            }
            parsed
        }))
    }

    /// All records, ascending by start date.
    pub async fn list_activities(&self) -> Result<Vec<ActivityRecord>> {
        let records = sqlx::query_as::<_, ActivityRecord>(
            r"
            SELECT strava_activity_id, name, start_date, elapsed_time, count, avg_time, calories
            FROM activities
            ORDER BY start_date ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
