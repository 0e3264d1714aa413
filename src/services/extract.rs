// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Extraction of push-up metrics from free-text descriptions.
//!
//! The Puuush app writes descriptions like:
//!
//! ```text
//! Total Reps: 57
//! Average Time per Push-Up: 0.67s
//! Burned Calories: 18.06
//!
//! Data from Puuush App
//! ```
//!
//! Matching is best-effort by design; the extractor sits behind a trait
//! so the rules can change without touching the sync or storage code.

use regex::Regex;

/// Marker substring that qualifies a description for extraction at all.
/// Activities without it are skipped, never stored as zero-valued rows.
pub const REPS_MARKER: &str = "Total Reps";

/// Numeric fields extracted from one description. Each field is zero
/// when its marker is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PushupMetrics {
    pub count: i64,
    pub avg_time: f64,
    pub calories: f64,
}

/// Extraction strategy over a free-text description.
pub trait PushupExtractor: Send + Sync {
    fn extract(&self, description: &str) -> PushupMetrics;
}

/// Regex-based extractor for the Puuush description format.
pub struct RegexExtractor {
    count_re: Regex,
    avg_re: Regex,
    calories_re: Regex,
}

impl RegexExtractor {
    pub fn new() -> Self {
        Self {
            count_re: Regex::new(r"Total Reps: (\d+)").expect("valid pattern"),
            avg_re: Regex::new(r"Average Time per Push-Up: (\d+(\.\d+)?)s").expect("valid pattern"),
            calories_re: Regex::new(r"Burned Calories: (\d+(\.\d+)?)").expect("valid pattern"),
        }
    }
}

impl Default for RegexExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PushupExtractor for RegexExtractor {
    fn extract(&self, description: &str) -> PushupMetrics {
        let count = self
            .count_re
            .captures(description)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let avg_time = self
            .avg_re
            .captures(description)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0);
        let calories = self
            .calories_re
            .captures(description)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0);

        PushupMetrics {
            count,
            avg_time,
            calories,
        }
    }
}
