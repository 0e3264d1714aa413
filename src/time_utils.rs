// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.
//!
//! Stored `start_date` strings come from Strava and are normally RFC3339,
//! but older rows may use the `YYYY-MM-DD HH:MM:SS+00:00` spelling. The
//! parsers here accept both; callers decide whether an unparseable value
//! is fatal (it never is for analytics).

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp into UTC. Accepts RFC3339 and the legacy
/// space-separated spelling; a bare datetime is assumed to be UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    None
}

/// Extract the calendar date of a stored timestamp, in the timestamp's
/// own offset. Streaks work on local-date granularity, so the offset is
/// kept rather than converting to UTC first.
pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2025-01-15T06:30:00Z").expect("should parse");
        assert_eq!(format_utc_rfc3339(ts), "2025-01-15T06:30:00Z");
    }

    #[test]
    fn test_parse_timestamp_legacy_spelling() {
        let ts = parse_timestamp("2025-01-15 06:30:00+00:00").expect("should parse");
        assert_eq!(format_utc_rfc3339(ts), "2025-01-15T06:30:00Z");
    }

    #[test]
    fn test_parse_timestamp_garbage() {
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn test_parse_local_date_keeps_offset() {
        // 23:30 at -02:00 is the next day in UTC; the local date wins.
        let date = parse_local_date("2025-01-15T23:30:00-02:00").expect("should parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_local_date_date_only() {
        let date = parse_local_date("2025-01-15").expect("should parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }
}
