//! Error types for fetching metrics, building the dashboard and resolving configuration.

use thiserror::Error;

/// Why a request never produced a usable response.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Errors a single polling cycle can produce.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to fetch metrics: {0}")]
    FetchFailed(#[from] FetchFailure),
    #[error("failed to parse metrics payload: {0}")]
    ParseFailed(#[from] serde_json::Error),
}

impl MetricsError {
    /// HTTP status of a rejected request, if that is what failed.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            MetricsError::FetchFailed(FetchFailure::Status(s)) => Some(*s),
            _ => None,
        }
    }
}

/// Fatal conditions while building the dashboard.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("chart mount point '{0}' is missing")]
    MissingMount(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("website id must not be empty")]
    EmptyWebsiteId,
    #[error("invalid API endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("refresh interval must be greater than zero")]
    ZeroInterval,
}
