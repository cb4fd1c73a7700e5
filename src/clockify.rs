use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::http::{HttpClient, HttpError};
use crate::models::{TimeEntry, User, Workspace};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("failed to get {resource}, got status {status}")]
    Status { resource: &'static str, status: u16 },
    #[error("failed to decode {resource}: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Read-only accessors for the Clockify v1 REST API.
#[derive(Clone)]
pub struct ClockifyClient {
    http: HttpClient,
    base_url: String,
}

impl ClockifyClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn fetch_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        let url = format!("{}/workspaces", self.base_url);
        self.fetch("workspaces", &url)
    }

    pub fn fetch_current_user(&self) -> Result<User, ApiError> {
        let url = format!("{}/user", self.base_url);
        self.fetch("user", &url)
    }

    pub fn fetch_time_entries(
        &self,
        workspace_id: &str,
        user_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<TimeEntry>, ApiError> {
        let base = format!(
            "{}/workspaces/{}/user/{}/time-entries",
            self.base_url, workspace_id, user_id
        );
        let url = Url::parse_with_params(&base, &[("start", start), ("end", end)])
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        self.fetch("time-entries", url.as_str())
    }

    fn fetch<T: DeserializeOwned>(&self, resource: &'static str, url: &str) -> Result<T, ApiError> {
        let response = self.http.get(url, None)?;

        if !response.is_success() {
            return Err(ApiError::Status {
                resource,
                status: response.status,
            });
        }

        let decoded = serde_json::from_slice(&response.body)
            .map_err(|source| ApiError::Decode { resource, source })?;
        debug!(resource, "decoded response");
        Ok(decoded)
    }
}
