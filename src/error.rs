// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Application error type shared by all modules.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Strava API error: {0}")]
    StravaApi(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Marker carried in `StravaApi` errors when Strava responds 429.
    pub const STRAVA_RATE_LIMIT: &'static str = "rate_limit_exceeded";
    /// Marker carried in `StravaApi` errors when Strava responds 401.
    pub const STRAVA_TOKEN_ERROR: &'static str = "invalid_or_expired_token";

    /// Whether this error is the Strava rate-limit signal. The sync pass
    /// treats it as a graceful early stop instead of a failure.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::StravaApi(msg) if msg.contains(Self::STRAVA_RATE_LIMIT))
    }

    /// Whether this error indicates an invalid or expired Strava token.
    pub fn is_strava_token_error(&self) -> bool {
        matches!(self, Self::StravaApi(msg) if msg.contains(Self::STRAVA_TOKEN_ERROR))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
