//! Page views over time: braille line chart.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::chart::ChartWidget;
use crate::ui::theme::AXIS;
use crate::ui::util::human_count;

// Interpolated points per segment when the line is smoothed
const SAMPLES_PER_SEGMENT: usize = 8;

/// First, middle and last label, without repeats for short series.
pub fn axis_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => vec![],
        1 => vec![labels[0].clone()],
        2 => vec![labels[0].clone(), labels[1].clone()],
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

pub fn draw_pageviews_chart(f: &mut ratatui::Frame<'_>, area: Rect, w: &ChartWidget) {
    let block = Block::default().borders(Borders::ALL).title(w.title.clone());
    if w.values().is_empty() {
        f.render_widget(Paragraph::new("waiting for data...").block(block), area);
        return;
    }

    let points = w.plot_points(SAMPLES_PER_SEGMENT);
    let x_max = (w.values().len().saturating_sub(1)).max(1) as f64;
    let y_top = w.max_value().max(1);
    let y_max = y_top as f64 * 1.1;

    let x_labels: Vec<Span> = axis_labels(w.labels()).into_iter().map(Span::raw).collect();
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(human_count(y_top / 2)),
        Span::raw(human_count(y_top)),
    ];

    let dataset = Dataset::default()
        .name(w.title.clone())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(w.color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(AXIS))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(AXIS))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn x_axis_labels_never_repeat() {
        assert!(axis_labels(&[]).is_empty());
        assert_eq!(axis_labels(&owned(&["Mon"])), owned(&["Mon"]));
        assert_eq!(axis_labels(&owned(&["Mon", "Tue"])), owned(&["Mon", "Tue"]));
        assert_eq!(
            axis_labels(&owned(&["Mon", "Tue", "Wed"])),
            owned(&["Mon", "Tue", "Wed"])
        );
        assert_eq!(
            axis_labels(&owned(&["1", "2", "3", "4", "5"])),
            owned(&["1", "3", "5"])
        );
    }
}
