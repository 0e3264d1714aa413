// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Token refresh (refresh-token grant)
//! - Windowed activity listing (after/before bounds, bounded page size)
//! - Detail fetch by id (descriptions only exist on detail responses)
//! - Rate limit detection (429 surfaces as a distinguishable error)

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::services::sync::SyncWindow;

const OAUTH_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// The remote activity source the sync engine runs against. Implemented
/// by [`StravaClient`]; tests script their own implementation.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Exchange a refresh token for a fresh token pair. The returned
    /// value is immutable; a later refresh produces a new value rather
    /// than mutating shared state.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenRefreshResponse>;

    /// List activity summaries inside the window, capped at `per_page`.
    /// A single page is fetched per sync pass.
    async fn list_activities(
        &self,
        access_token: &str,
        window: &SyncWindow,
        per_page: u32,
    ) -> Result<Vec<ActivitySummary>>;

    /// Fetch the full activity, including its description.
    async fn get_activity(&self, access_token: &str, activity_id: i64) -> Result<ActivityDetail>;
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://www.strava.com/api/v3".to_string(),
            client_id,
            client_secret,
        }
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Rate limit - ends the sync pass early, not an error
            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
                return Err(AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string()));
            }

            // Unauthorized - token may be expired
            if status.as_u16() == 401 {
                return Err(AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string()));
            }

            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl ActivitySource for StravaClient {
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenRefreshResponse> {
        let response = self
            .http
            .post(OAUTH_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    async fn list_activities(
        &self,
        access_token: &str,
        window: &SyncWindow,
        per_page: u32,
    ) -> Result<Vec<ActivitySummary>> {
        let url = format!("{}/athlete/activities", self.base_url);
        let (bound, timestamp) = match window {
            SyncWindow::After(t) => ("after", t.timestamp()),
            SyncWindow::Before(t) => ("before", t.timestamp()),
        };

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                (bound, timestamp.to_string()),
                ("page", "1".to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    async fn get_activity(&self, access_token: &str, activity_id: i64) -> Result<ActivityDetail> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Summary activity from the list endpoint. Summaries carry no
/// description; that requires a detail fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySummary {
    pub id: i64,
    pub name: String,
    pub start_date: String,
}

/// Detailed Strava activity response.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityDetail {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub elapsed_time: i64,
    pub description: Option<String>,
}
