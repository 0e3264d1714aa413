// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pushup-Tracker: sync push-up activities from Strava into a local
//! SQLite store and derive streak and total statistics.
//!
//! The Puuush app uploads each push-up session to Strava with the rep
//! count, average rep time and calories embedded in the activity
//! description. This crate pulls those activities down, parses the
//! descriptions, and keeps one idempotent row per Strava activity id.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod time_utils;
