//! Resolved dashboard configuration and its validation.

use std::time::Duration;

use crate::error::ConfigError;
use crate::profiles::ProfileEntry;

pub const DEFAULT_REFRESH_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub website_id: String,
    pub api_endpoint: String,
    pub refresh_interval: Duration,
    /// Panels to show; `None` means all of them.
    pub panels: Option<Vec<String>>,
}

impl DashboardConfig {
    pub fn from_profile(entry: &ProfileEntry) -> Result<Self, ConfigError> {
        let website_id = entry.website_id.trim();
        if website_id.is_empty() {
            return Err(ConfigError::EmptyWebsiteId);
        }

        let api_endpoint = entry.api_endpoint.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&api_endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: entry.api_endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: entry.api_endpoint.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let ms = entry.refresh_interval_ms.unwrap_or(DEFAULT_REFRESH_MS);
        if ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(Self {
            website_id: website_id.to_string(),
            api_endpoint,
            refresh_interval: Duration::from_millis(ms),
            panels: entry.panels.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(endpoint: &str, site: &str, ms: Option<u64>) -> ProfileEntry {
        ProfileEntry {
            api_endpoint: endpoint.into(),
            website_id: site.into(),
            refresh_interval_ms: ms,
            panels: None,
        }
    }

    #[test]
    fn defaults_to_thirty_seconds() {
        let cfg =
            DashboardConfig::from_profile(&entry("https://stats.example.com/api/", "abc", None))
                .unwrap();
        assert_eq!(cfg.refresh_interval, Duration::from_millis(30_000));
        assert_eq!(cfg.api_endpoint, "https://stats.example.com/api");
        assert_eq!(cfg.website_id, "abc");
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            DashboardConfig::from_profile(&entry("https://a/api", "  ", None)),
            Err(ConfigError::EmptyWebsiteId)
        ));
        assert!(matches!(
            DashboardConfig::from_profile(&entry("not a url", "abc", None)),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            DashboardConfig::from_profile(&entry("ws://a/api", "abc", None)),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            DashboardConfig::from_profile(&entry("https://a/api", "abc", Some(0))),
            Err(ConfigError::ZeroInterval)
        ));
    }
}
