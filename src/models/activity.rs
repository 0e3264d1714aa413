// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push-up activity models for storage.

use serde::{Deserialize, Serialize};

use crate::services::extract::PushupMetrics;
use crate::services::strava::ActivityDetail;

/// Stored activity record, one row per Strava activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityRecord {
    /// Strava activity ID (primary key, never regenerated)
    pub strava_activity_id: i64,
    /// Activity name/title, overwritten on re-sync
    pub name: String,
    /// Start date/time as reported by Strava (ISO 8601, offset preserved)
    pub start_date: String,
    /// Elapsed time in seconds
    pub elapsed_time: i64,
    /// Push-up repetitions parsed from the description
    pub count: i64,
    /// Average seconds per repetition
    pub avg_time: f64,
    /// Burned calories parsed from the description
    pub calories: f64,
}

/// A push-up record derived from a generic Strava activity, ready to be
/// upserted. Built field-by-field from the detail response so the
/// workout → push-up translation is explicit in one place.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub strava_activity_id: i64,
    pub name: String,
    pub start_date: String,
    pub elapsed_time: i64,
    pub count: i64,
    pub avg_time: f64,
    pub calories: f64,
}

impl NewActivity {
    /// Translate a Strava activity detail plus its extracted metrics into
    /// a push-up record.
    pub fn from_detail(detail: &ActivityDetail, metrics: PushupMetrics) -> Self {
        Self {
            strava_activity_id: detail.id,
            name: detail.name.clone(),
            start_date: detail.start_date.clone(),
            elapsed_time: detail.elapsed_time,
            count: metrics.count,
            avg_time: metrics.avg_time,
            calories: metrics.calories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detail_copies_all_fields() {
        let detail = ActivityDetail {
            id: 42,
            name: "Morning Push-Ups".to_string(),
            start_date: "2025-01-15T06:30:00Z".to_string(),
            elapsed_time: 95,
            description: Some("Total Reps: 57".to_string()),
        };
        let metrics = PushupMetrics {
            count: 57,
            avg_time: 0.67,
            calories: 18.06,
        };

        let record = NewActivity::from_detail(&detail, metrics);

        assert_eq!(record.strava_activity_id, 42);
        assert_eq!(record.name, "Morning Push-Ups");
        assert_eq!(record.start_date, "2025-01-15T06:30:00Z");
        assert_eq!(record.elapsed_time, 95);
        assert_eq!(record.count, 57);
        assert_eq!(record.avg_time, 0.67);
        assert_eq!(record.calories, 18.06);
    }
}
