// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod stats;

pub use activity::{ActivityRecord, NewActivity};
pub use stats::PushupStats;
