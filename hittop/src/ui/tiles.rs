//! Scalar tiles: one bordered box per slot present on the surface.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::dashboard::{Surface, SLOT_AVG_TIME, SLOT_PAGEVIEWS, SLOT_REALTIME, SLOT_UNIQUE};
use crate::ui::theme::TILE_VALUE;

pub fn slot_title(slot: &str) -> &str {
    match slot {
        SLOT_REALTIME => "Realtime Visitors",
        SLOT_PAGEVIEWS => "Page Views",
        SLOT_UNIQUE => "Unique Visitors",
        SLOT_AVG_TIME => "Avg. Time",
        other => other,
    }
}

pub fn draw_tiles(f: &mut ratatui::Frame<'_>, area: Rect, surface: &Surface) {
    let slots: Vec<(&str, &str)> = surface.slots().collect();
    if slots.is_empty() { return; }

    let n = slots.len() as u32;
    let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (rect, (slot, value)) in cols.iter().zip(slots) {
        let line = Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(TILE_VALUE).add_modifier(Modifier::BOLD),
        ));
        let p = Paragraph::new(line)
            .centered()
            .block(Block::default().borders(Borders::ALL).title(slot_title(slot)));
        f.render_widget(p, *rect);
    }
}
