// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push-up statistics: time-bucketed totals and the current streak.
//!
//! Everything here is a pure function over the stored records so it can
//! be tested with a pinned "today". Weeks are Sunday-anchored: a record
//! lands in the bucket of the Sunday on or before its date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::ActivityRecord;
use crate::time_utils;

/// Aggregated push-up totals plus the current consecutive-day streak.
#[derive(Debug, Clone, Default)]
pub struct PushupStats {
    /// Total reps per calendar year
    pub yearly: BTreeMap<i32, i64>,
    /// Total reps per calendar month ("YYYY-MM")
    pub monthly: BTreeMap<String, i64>,
    /// Total reps per week, keyed by the week's Sunday
    pub weekly: BTreeMap<NaiveDate, i64>,
    /// Consecutive days (ending today or yesterday) with at least one
    /// qualifying activity
    pub streak: u32,
}

impl PushupStats {
    /// Aggregate stored records into yearly/monthly/weekly totals and
    /// compute the streak relative to `today`.
    ///
    /// Records whose `start_date` cannot be parsed are logged and
    /// excluded entirely. Zero-count records add nothing to the totals
    /// but still count as activity days for the streak: a session whose
    /// description carried no parseable rep number is still a session.
    pub fn from_records(records: &[ActivityRecord], today: NaiveDate) -> Self {
        let mut stats = Self::default();
        let mut dates = Vec::new();

        for record in records {
            let Some(date) = time_utils::parse_local_date(&record.start_date) else {
                tracing::warn!(
                    activity_id = record.strava_activity_id,
                    start_date = %record.start_date,
                    "Unparseable start date, excluded from stats"
                );
                continue;
            };
            dates.push(date);

            if record.count <= 0 {
                continue;
            }

            *stats.yearly.entry(date.year()).or_insert(0) += record.count;
            *stats
                .monthly
                .entry(format!("{:04}-{:02}", date.year(), date.month()))
                .or_insert(0) += record.count;
            *stats.weekly.entry(week_start(date)).or_insert(0) += record.count;
        }

        stats.streak = calculate_streak(&dates, today);
        stats
    }
}

/// The Sunday on or before `date`, used as the weekly bucket key.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Count consecutive calendar days with activity, walking backwards from
/// today (or yesterday, if today has none yet).
///
/// Duplicate dates collapse to one day; the first gap in the chain stops
/// the count. A most-recent date older than yesterday means the streak
/// is already broken.
pub fn calculate_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let mut unique: Vec<NaiveDate> = unique.into_iter().collect();
    unique.reverse();

    let Some(&most_recent) = unique.first() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    let (mut streak, mut expected, mut idx) = if most_recent == today {
        (1, yesterday, 1)
    } else if most_recent == yesterday {
        (0, yesterday, 0)
    } else {
        return 0;
    };

    while idx < unique.len() && unique[idx] == expected {
        streak += 1;
        expected = expected - Duration::days(1);
        idx += 1;
    }

    streak
}
