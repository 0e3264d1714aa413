// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod extract;
pub mod strava;
pub mod sync;

pub use extract::{PushupExtractor, PushupMetrics, RegexExtractor};
pub use strava::{ActivitySource, StravaClient};
pub use sync::{SyncEngine, SyncReport, SyncWindow};
