//! Types that mirror the analytics API's JSON schema.

use serde::{Deserialize, Serialize};

/// Parallel label/value sequences; index `i` in one describes the same observation as in the other.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub realtime: u64,
    pub pageviews: u64,
    pub unique: u64,
    // seconds
    pub avg_time: f64,
    pub pageviews_data: Series,
    // ordered by descending views (server side)
    pub top_pages_data: Series,
}
