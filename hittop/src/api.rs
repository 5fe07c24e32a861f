//! Minimal HTTP client for requesting metrics from the analytics API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};

use crate::credentials::{TokenStore, TOKEN_KEY};
use crate::error::{FetchFailure, MetricsError};
use crate::types::MetricsSnapshot;

/// Anything that can produce one snapshot per call.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, MetricsError>;
}

pub struct MetricsClient {
    http: Client,
    url: String,
    tokens: Arc<dyn TokenStore>,
}

impl MetricsClient {
    pub fn new(
        api_endpoint: &str,
        website_id: &str,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("hittop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: metrics_url(api_endpoint, website_id),
            tokens,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// {endpoint}/websites/{siteId}/metrics
pub fn metrics_url(api_endpoint: &str, website_id: &str) -> String {
    format!(
        "{}/websites/{}/metrics",
        api_endpoint.trim_end_matches('/'),
        urlencoding::encode(website_id)
    )
}

#[async_trait]
impl MetricsSource for MetricsClient {
    // Single attempt: no retry, no timeout, no caching
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, MetricsError> {
        let mut req = self.http.get(&self.url);
        // Read the token per call so an externally refreshed one is used right away
        match self.tokens.get(TOKEN_KEY) {
            Some(token) => req = req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => tracing::warn!(
                key = TOKEN_KEY,
                "no API token stored; sending unauthenticated request"
            ),
        }

        let resp = req.send().await.map_err(FetchFailure::Transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status).into());
        }
        let body = resp.bytes().await.map_err(FetchFailure::Transport)?;
        let snapshot = serde_json::from_slice::<MetricsSnapshot>(&body)?;
        tracing::debug!(
            url = %self.url,
            realtime = snapshot.realtime,
            pageviews = snapshot.pageviews,
            "fetched metrics"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_endpoint_and_site() {
        assert_eq!(
            metrics_url("https://stats.example.com/api", "abc-123"),
            "https://stats.example.com/api/websites/abc-123/metrics"
        );
        assert_eq!(
            metrics_url("https://stats.example.com/api/", "abc"),
            "https://stats.example.com/api/websites/abc/metrics"
        );
    }

    #[test]
    fn url_encodes_site_segment() {
        assert_eq!(
            metrics_url("http://h", "my site/1"),
            "http://h/websites/my%20site%2F1/metrics"
        );
    }
}
