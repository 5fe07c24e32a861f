//! Top pages: horizontal bars, one row per page, in the order the API sent them.

use ratatui::{
    layout::{Direction, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::chart::ChartWidget;
use crate::ui::util::{human_count, truncate_middle};

pub fn draw_top_pages_chart(f: &mut ratatui::Frame<'_>, area: Rect, w: &ChartWidget) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Top Pages ({})", w.title));
    if w.values().is_empty() {
        f.render_widget(Paragraph::new("waiting for data...").block(block), area);
        return;
    }

    // label column gets roughly a third of the inner width
    let label_w = (area.width.saturating_sub(2) / 3).max(8) as usize;
    let bars: Vec<Bar> = w
        .labels()
        .iter()
        .zip(w.values())
        .map(|(label, &v)| {
            Bar::default()
                .value(v)
                .label(Line::from(truncate_middle(label, label_w)))
                .text_value(human_count(v))
                .style(Style::default().fg(w.color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(w.max_value().max(1))
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}
