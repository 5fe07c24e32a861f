//! Demo source: synthetic snapshots generated in-process, so the UI can be tried without an API.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local, Timelike};

use crate::api::MetricsSource;
use crate::error::MetricsError;
use crate::types::{MetricsSnapshot, Series};

const HOURS: i64 = 24;
const PAGES: [(&str, u64); 6] = [
    ("/", 900),
    ("/blog", 420),
    ("/pricing", 310),
    ("/docs/getting-started", 260),
    ("/about", 120),
    ("/contact", 75),
];

#[derive(Default)]
pub struct DemoSource {
    calls: AtomicU64,
}

impl DemoSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

// Cheap deterministic wobble in 0..span
fn wobble(seed: u64, span: u64) -> u64 {
    let x = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (x >> 33) % span.max(1)
}

pub fn synth_snapshot(n: u64) -> MetricsSnapshot {
    let now = Local::now();
    let start = now - ChronoDuration::hours(HOURS - 1);

    let mut labels = Vec::with_capacity(HOURS as usize);
    let mut values = Vec::with_capacity(HOURS as usize);
    for i in 0..HOURS {
        let t = start + ChronoDuration::hours(i);
        labels.push(format!("{:02}:00", t.hour()));
        // daytime bump around 14:00
        let hour = t.hour() as f64;
        let base = 60.0 + 140.0 * (-(hour - 14.0).powi(2) / 18.0).exp();
        values.push(base as u64 + wobble(n * 31 + i as u64, 25));
    }
    let pageviews: u64 = values.iter().sum();

    let mut pages: Vec<(String, u64)> = PAGES
        .iter()
        .enumerate()
        .map(|(i, (p, v))| (p.to_string(), v + wobble(n * 7 + i as u64, 60)))
        .collect();
    pages.sort_by(|a, b| b.1.cmp(&a.1));
    let (page_labels, page_values): (Vec<String>, Vec<u64>) = pages.into_iter().unzip();

    MetricsSnapshot {
        realtime: 3 + wobble(n, 20),
        pageviews,
        unique: pageviews * 3 / 10 + wobble(n + 1, 40),
        avg_time: 95.0 + wobble(n + 2, 90) as f64 + 0.5,
        pageviews_data: Series { labels, values },
        top_pages_data: Series {
            labels: page_labels,
            values: page_values,
        },
    }
}

#[async_trait]
impl MetricsSource for DemoSource {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, MetricsError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(synth_snapshot(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_series_are_parallel_and_sorted() {
        for n in 0..5 {
            let s = synth_snapshot(n);
            assert_eq!(s.pageviews_data.labels.len(), HOURS as usize);
            assert_eq!(s.pageviews_data.labels.len(), s.pageviews_data.values.len());
            assert_eq!(s.top_pages_data.labels.len(), s.top_pages_data.values.len());
            assert!(s.top_pages_data.values.windows(2).all(|w| w[0] >= w[1]));
            assert_eq!(s.pageviews, s.pageviews_data.values.iter().sum::<u64>());
        }
    }

    #[tokio::test]
    async fn demo_source_counts_calls() {
        let src = DemoSource::new();
        src.fetch_metrics().await.unwrap();
        src.fetch_metrics().await.unwrap();
        assert_eq!(src.calls(), 2);
    }
}
