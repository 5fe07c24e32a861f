//! Projects a snapshot onto the surface and charts. Holds no state of its own.

use crate::chart::ChartWidget;
use crate::dashboard::{Surface, SLOT_AVG_TIME, SLOT_PAGEVIEWS, SLOT_REALTIME, SLOT_UNIQUE};
use crate::types::MetricsSnapshot;

/// Write text into a named slot. Missing slots are skipped silently.
pub fn update_scalar(surface: &mut Surface, slot: &str, value: impl Into<String>) {
    if let Some(text) = surface.slot_mut(slot) {
        *text = value.into();
    }
}

/// `125.0` -> `"2m 5s"`. Negative or non-finite input is not handled.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let remaining = (seconds % 60.0).floor() as i64;
    format!("{minutes}m {remaining}s")
}

/// Replace both charts' series with the snapshot's, then request a redraw of each.
pub fn update_charts(
    pageviews_chart: &mut ChartWidget,
    top_pages_chart: &mut ChartWidget,
    snapshot: &MetricsSnapshot,
) {
    pageviews_chart.set_series(
        snapshot.pageviews_data.labels.clone(),
        snapshot.pageviews_data.values.clone(),
    );
    pageviews_chart.update();

    top_pages_chart.set_series(
        snapshot.top_pages_data.labels.clone(),
        snapshot.top_pages_data.values.clone(),
    );
    top_pages_chart.update();
}

pub fn apply_snapshot(
    surface: &mut Surface,
    pageviews_chart: &mut ChartWidget,
    top_pages_chart: &mut ChartWidget,
    snapshot: &MetricsSnapshot,
) {
    update_scalar(surface, SLOT_REALTIME, snapshot.realtime.to_string());
    update_scalar(surface, SLOT_PAGEVIEWS, snapshot.pageviews.to_string());
    update_scalar(surface, SLOT_UNIQUE, snapshot.unique.to_string());
    update_scalar(surface, SLOT_AVG_TIME, format_duration(snapshot.avg_time));
    update_charts(pageviews_chart, top_pages_chart, snapshot);
}
