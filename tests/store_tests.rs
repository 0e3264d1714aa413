// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for the SQLite store and CSV export.

use chrono::{TimeZone, Utc};
use pushup_tracker::db::Database;
use pushup_tracker::export;
use pushup_tracker::models::NewActivity;

async fn test_db() -> Database {
    Database::connect(":memory:")
        .await
        .expect("in-memory database should open")
}

fn activity(id: i64, name: &str, start_date: &str, count: i64) -> NewActivity {
    NewActivity {
        strava_activity_id: id,
        name: name.to_string(),
        start_date: start_date.to_string(),
        elapsed_time: 60,
        count,
        avg_time: 0.7,
        calories: 15.0,
    }
}

#[tokio::test]
async fn test_upsert_creates_then_updates_in_place() {
    let db = test_db().await;

    let first = activity(1, "Morning Push-Ups", "2025-01-10T08:00:00Z", 40);
    assert!(db.upsert_activity(&first).await.expect("first upsert"));

    // Same id observed again with edited fields and a (bogus) different
    // start date.
    let mut second = activity(1, "Morning Push-Ups (edited)", "2025-01-11T09:00:00Z", 55);
    second.elapsed_time = 120;
    second.avg_time = 0.5;
    second.calories = 20.0;
    assert!(!db.upsert_activity(&second).await.expect("second upsert"));

    let records = db.list_activities().await.expect("list");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    // Mutable fields reflect the last upsert.
    assert_eq!(record.name, "Morning Push-Ups (edited)");
    assert_eq!(record.count, 55);
    assert_eq!(record.avg_time, 0.5);
    assert_eq!(record.calories, 20.0);
    // Immutable facts of the original activity survive.
    assert_eq!(record.start_date, "2025-01-10T08:00:00Z");
    assert_eq!(record.elapsed_time, 60);
}

#[tokio::test]
async fn test_one_row_per_distinct_id() {
    let db = test_db().await;

    for _ in 0..3 {
        db.upsert_activity(&activity(7, "Push-Ups", "2025-01-10T08:00:00Z", 30))
            .await
            .expect("upsert");
    }
    db.upsert_activity(&activity(8, "Push-Ups", "2025-01-11T08:00:00Z", 25))
        .await
        .expect("upsert");

    assert_eq!(db.list_activities().await.expect("list").len(), 2);
}

#[tokio::test]
async fn test_latest_start_date_empty_store() {
    let db = test_db().await;
    assert!(db.latest_start_date().await.expect("query").is_none());
}

#[tokio::test]
async fn test_latest_start_date_returns_maximum() {
    let db = test_db().await;

    db.upsert_activity(&activity(1, "Push-Ups", "2025-01-10T08:00:00Z", 40))
        .await
        .expect("upsert");
    db.upsert_activity(&activity(2, "Push-Ups", "2025-02-01T09:30:00Z", 35))
        .await
        .expect("upsert");

    let latest = db.latest_start_date().await.expect("query").expect("some");
    assert_eq!(latest, Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap());
}

#[tokio::test]
async fn test_list_is_ordered_by_start_date() {
    let db = test_db().await;

    db.upsert_activity(&activity(2, "Push-Ups", "2025-02-01T09:30:00Z", 35))
        .await
        .expect("upsert");
    db.upsert_activity(&activity(1, "Push-Ups", "2025-01-10T08:00:00Z", 40))
        .await
        .expect("upsert");
    db.upsert_activity(&activity(3, "Push-Ups", "2025-03-05T07:00:00Z", 50))
        .await
        .expect("upsert");

    let records = db.list_activities().await.expect("list");
    let ids: Vec<i64> = records.iter().map(|r| r.strava_activity_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_csv_export_writes_header_and_rows() {
    let db = test_db().await;
    db.upsert_activity(&activity(1, "Morning Push-Ups", "2025-01-10T08:00:00Z", 40))
        .await
        .expect("upsert");

    let path = std::env::temp_dir().join("pushup_tracker_export_test.csv");
    let path = path.to_str().expect("utf-8 temp path");

    let rows = export::write_activities_csv(&db, path)
        .await
        .expect("export should succeed");
    assert_eq!(rows, 1);

    let contents = std::fs::read_to_string(path).expect("read csv");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("strava_activity_id,name,start_date,elapsed_time,count,avg_time,calories")
    );
    assert_eq!(
        lines.next(),
        Some("1,Morning Push-Ups,2025-01-10T08:00:00Z,60,40,0.7,15")
    );

    std::fs::remove_file(path).ok();
}
