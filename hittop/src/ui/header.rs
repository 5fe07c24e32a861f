//! Top header with site id and time of the last successful refresh.

use crate::dashboard::Dashboard;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, d: &Dashboard, site: &str) {
    let title = match d.last_refresh() {
        Some(at) => format!(
            "hittop — site: {} | updated {}  (press 'q' to quit)",
            site,
            at.format("%H:%M:%S")
        ),
        None => format!("hittop — site: {site} | loading... (press 'q' to quit)"),
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
