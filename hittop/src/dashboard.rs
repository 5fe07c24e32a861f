//! Dashboard root: the display surface plus the two chart widgets it owns.

use std::collections::BTreeSet;

use chrono::{DateTime, Local};

use crate::chart::ChartWidget;
use crate::display::apply_snapshot;
use crate::error::SetupError;
use crate::types::MetricsSnapshot;
use crate::ui::theme::{PAGEVIEWS_COLOR, TOP_PAGES_COLOR};

pub const SLOT_REALTIME: &str = "realtime-visitors";
pub const SLOT_PAGEVIEWS: &str = "page-views";
pub const SLOT_UNIQUE: &str = "unique-visitors";
pub const SLOT_AVG_TIME: &str = "avg-time";

pub const MOUNT_PAGEVIEWS: &str = "pageviews-chart";
pub const MOUNT_TOP_PAGES: &str = "top-pages-chart";

/// Scalar slots in display order.
pub const SCALAR_SLOTS: [&str; 4] = [SLOT_REALTIME, SLOT_PAGEVIEWS, SLOT_UNIQUE, SLOT_AVG_TIME];
pub const CHART_MOUNTS: [&str; 2] = [MOUNT_PAGEVIEWS, MOUNT_TOP_PAGES];

// Text a slot shows before the first successful refresh
const PLACEHOLDER: &str = "-";

/// Named places the UI provides: scalar slots (with their current text) and chart mount points.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    slots: Vec<(String, String)>,
    mounts: BTreeSet<String>,
}

impl Surface {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every slot and mount point.
    pub fn standard() -> Self {
        Self::with_panels(SCALAR_SLOTS.iter().chain(CHART_MOUNTS.iter()))
    }

    /// Only the listed ids; unknown ids are ignored.
    pub fn with_panels<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: BTreeSet<String> = ids.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut surface = Self::empty();
        for slot in SCALAR_SLOTS {
            if wanted.contains(slot) {
                surface.add_slot(slot);
            }
        }
        for mount in CHART_MOUNTS {
            if wanted.contains(mount) {
                surface.add_mount(mount);
            }
        }
        surface
    }

    pub fn add_slot(&mut self, name: &str) {
        if self.slot(name).is_none() {
            self.slots.push((name.to_string(), PLACEHOLDER.to_string()));
        }
    }

    pub fn add_mount(&mut self, name: &str) {
        self.mounts.insert(name.to_string());
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        self.slots
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn has_mount(&self, name: &str) -> bool {
        self.mounts.contains(name)
    }
}

pub struct Dashboard {
    surface: Surface,
    pub pageviews_chart: ChartWidget,
    pub top_pages_chart: ChartWidget,
    last_refresh: Option<DateTime<Local>>,
}

impl Dashboard {
    /// Both chart mount points must exist; scalar slots are optional.
    pub fn new(surface: Surface) -> Result<Self, SetupError> {
        for mount in CHART_MOUNTS {
            if !surface.has_mount(mount) {
                return Err(SetupError::MissingMount(mount.to_string()));
            }
        }
        Ok(Self {
            surface,
            pageviews_chart: ChartWidget::line("Page Views", PAGEVIEWS_COLOR, 0.1),
            top_pages_chart: ChartWidget::bar("Views", TOP_PAGES_COLOR),
            last_refresh: None,
        })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    /// Project a full snapshot onto slots and charts.
    pub fn apply(&mut self, snapshot: &MetricsSnapshot) {
        apply_snapshot(
            &mut self.surface,
            &mut self.pageviews_chart,
            &mut self.top_pages_chart,
            snapshot,
        );
        self.last_refresh = Some(Local::now());
    }
}
