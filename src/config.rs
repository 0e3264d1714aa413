//! Application configuration loaded from environment variables.
//!
//! Strava credentials are only required for the sync path; the stats and
//! export commands work against the local store without them.

use std::env;

/// Non-sensitive configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub database_path: String,
    /// Path the CSV export is written to
    pub csv_path: String,
    /// Case-insensitive substring that marks an activity as a push-up
    /// session (matched against the activity name)
    pub activity_keyword: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "data.db".to_string(),
            csv_path: "pushup_data.csv".to_string(),
            activity_keyword: "push-ups".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// everything. A `.env` file is honored if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            csv_path: env::var("CSV_PATH").unwrap_or(defaults.csv_path),
            activity_keyword: env::var("ACTIVITY_KEYWORD").unwrap_or(defaults.activity_keyword),
        })
    }
}

/// Strava OAuth credentials. All three are required for a sync run.
#[derive(Debug, Clone)]
pub struct StravaSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl StravaSecrets {
    /// Load Strava credentials from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            client_id: env::var("STRAVA_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            refresh_token: env::var("STRAVA_REFRESH_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_REFRESH_TOKEN"))?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
