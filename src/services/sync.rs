// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Incremental sync from Strava into the local store.
//!
//! One pass per invocation: refresh the token, fetch one bounded page of
//! activities inside the computed window, keep the ones whose name
//! matches the keyword, pull their details, extract metrics and upsert.
//! The window reaches back 7 days past the latest stored record because
//! Strava activities can be edited or backfilled after creation; a hard
//! "after last-seen" cursor would silently miss those corrections.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::db::Database;
use crate::error::Result;
use crate::models::activity::NewActivity;
use crate::services::extract::{PushupExtractor, REPS_MARKER};
use crate::services::strava::ActivitySource;
use crate::time_utils;

/// Look-back margin applied to the latest stored record.
pub const LOOKBACK_DAYS: i64 = 7;

/// Activities fetched per pass. One page only; with the look-back window
/// and a daily sync this stays comfortably ahead of new activities.
pub const PAGE_LIMIT: u32 = 10;

/// Time filter handed to the remote list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncWindow {
    /// All activities strictly after this instant
    After(DateTime<Utc>),
    /// All activities before this instant (unbounded historical fetch)
    Before(DateTime<Utc>),
}

impl fmt::Display for SyncWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::After(t) => write!(f, "after {}", time_utils::format_utc_rfc3339(*t)),
            Self::Before(t) => write!(f, "before {}", time_utils::format_utc_rfc3339(*t)),
        }
    }
}

/// Compute the fetch window for one sync pass.
///
/// An explicit start date wins verbatim (first-ever sync, reprocessing).
/// Otherwise the latest stored date minus the look-back margin is used;
/// an empty store fetches everything before now and relies on the page
/// limit to bound the result.
pub fn select_window(
    explicit_start: Option<DateTime<Utc>>,
    latest_stored: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> SyncWindow {
    if let Some(start) = explicit_start {
        return SyncWindow::After(start);
    }
    match latest_stored {
        Some(latest) => SyncWindow::After(latest - Duration::days(LOOKBACK_DAYS)),
        None => SyncWindow::Before(now),
    }
}

/// Counters reported after one sync pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncReport {
    /// Rows newly inserted
    pub created: u32,
    /// Rows updated in place
    pub updated: u32,
    /// Matching activities skipped for lack of rep data
    pub skipped: u32,
    /// Records whose upsert failed (logged, not fatal)
    pub failed: u32,
    /// Whether the pass was cut short by the Strava rate limit
    pub rate_limited: bool,
}

/// Drives the fetch → filter → extract → upsert loop.
pub struct SyncEngine<S: ActivitySource> {
    source: S,
    db: Database,
    extractor: Box<dyn PushupExtractor>,
    keyword: String,
}

impl<S: ActivitySource> SyncEngine<S> {
    pub fn new(
        source: S,
        db: Database,
        extractor: Box<dyn PushupExtractor>,
        keyword: &str,
    ) -> Self {
        Self {
            source,
            db,
            extractor,
            keyword: keyword.to_lowercase(),
        }
    }

    /// Run one sync pass.
    ///
    /// Token refresh failure is fatal for the run. A rate-limit signal
    /// mid-pass ends it early with the work so far intact; a single
    /// record's store failure is logged and skipped.
    pub async fn run(
        &self,
        refresh_token: &str,
        start_date: Option<DateTime<Utc>>,
    ) -> Result<SyncReport> {
        let tokens = match self.source.refresh_access_token(refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) if e.is_strava_token_error() => {
                tracing::error!("Refresh token rejected, re-authorize the application");
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        tracing::info!("Access token refreshed");

        let latest = self.db.latest_start_date().await?;
        let window = select_window(start_date, latest, Utc::now());
        tracing::info!(window = %window, "Starting sync");

        let mut report = SyncReport::default();

        let summaries = match self
            .source
            .list_activities(&tokens.access_token, &window, PAGE_LIMIT)
            .await
        {
            Ok(summaries) => summaries,
            // Fall through with nothing to process so the pass still
            // ends with the usual summary event.
            Err(e) if e.is_rate_limit() => {
                tracing::warn!("Rate limit exceeded before fetch, stopping sync");
                report.rate_limited = true;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for summary in summaries {
            tracing::debug!(
                activity_id = summary.id,
                start_date = %summary.start_date,
                name = %summary.name,
                "Fetched activity"
            );
            if !summary.name.to_lowercase().contains(&self.keyword) {
                continue;
            }

            let detail = match self
                .source
                .get_activity(&tokens.access_token, summary.id)
                .await
            {
                Ok(detail) => detail,
                Err(e) if e.is_rate_limit() => {
                    tracing::warn!("Rate limit exceeded mid-pass, stopping sync early");
                    report.rate_limited = true;
                    break;
                }
                Err(e) => return Err(e),
            };

            let Some(description) = detail
                .description
                .as_deref()
                .filter(|d| d.contains(REPS_MARKER))
            else {
                tracing::info!(activity_id = detail.id, "No rep data in description, skipping");
                report.skipped += 1;
                continue;
            };

            let metrics = self.extractor.extract(description);
            let record = NewActivity::from_detail(&detail, metrics);

            match self.db.upsert_activity(&record).await {
                Ok(true) => {
                    report.created += 1;
                    tracing::info!(
                        activity_id = record.strava_activity_id,
                        count = record.count,
                        "Created activity"
                    );
                }
                Ok(false) => {
                    report.updated += 1;
                    tracing::info!(
                        activity_id = record.strava_activity_id,
                        count = record.count,
                        "Updated activity"
                    );
                }
                // One bad record must not abort the whole batch.
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        activity_id = record.strava_activity_id,
                        error = %e,
                        "Failed to store activity, continuing"
                    );
                }
            }
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "Sync pass complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_window_explicit_start_wins_verbatim() {
        let explicit = utc(2025, 1, 1, 0);
        let latest = Some(utc(2025, 6, 1, 0));

        let window = select_window(Some(explicit), latest, utc(2025, 6, 10, 0));

        assert_eq!(window, SyncWindow::After(explicit));
    }

    #[test]
    fn test_window_applies_lookback_to_latest() {
        let latest = utc(2025, 6, 8, 12);

        let window = select_window(None, Some(latest), utc(2025, 6, 10, 0));

        assert_eq!(window, SyncWindow::After(utc(2025, 6, 1, 12)));
    }

    #[test]
    fn test_window_empty_store_fetches_before_now() {
        let now = utc(2025, 6, 10, 0);

        let window = select_window(None, None, now);

        assert_eq!(window, SyncWindow::Before(now));
    }
}
