//! Chart widgets: each owns its label/value series, visual config and redraw state.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    /// Continuous series; `tension` 0.0 draws straight segments.
    Line { tension: f64 },
    /// Discrete category bars.
    Bar,
}

#[derive(Debug, Clone)]
pub struct ChartWidget {
    pub kind: ChartKind,
    pub title: String,
    pub color: Color,
    labels: Vec<String>,
    values: Vec<u64>,
    redraws: u64,
    dirty: bool,
}

impl ChartWidget {
    pub fn new(kind: ChartKind, title: &str, color: Color) -> Self {
        Self {
            kind,
            title: title.to_string(),
            color,
            labels: Vec::new(),
            values: Vec::new(),
            redraws: 0,
            dirty: false,
        }
    }

    pub fn line(title: &str, color: Color, tension: f64) -> Self {
        Self::new(ChartKind::Line { tension }, title, color)
    }

    pub fn bar(title: &str, color: Color) -> Self {
        Self::new(ChartKind::Bar, title, color)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Replace both sequences wholesale; nothing is merged with the previous series.
    pub fn set_series(&mut self, labels: Vec<String>, values: Vec<u64>) {
        self.labels = labels;
        self.values = values;
    }

    /// Request a redraw; the next frame picks it up.
    pub fn update(&mut self) {
        self.redraws += 1;
        self.dirty = true;
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Returns whether an update was requested since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Points to plot: x = index, y = value; smoothed when the line has tension.
    pub fn plot_points(&self, samples_per_segment: usize) -> Vec<(f64, f64)> {
        let raw: Vec<(f64, f64)> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v as f64))
            .collect();
        match self.kind {
            ChartKind::Line { tension } if tension > 0.0 => {
                smooth(&raw, tension, samples_per_segment)
            }
            _ => raw,
        }
    }
}

/// Cubic bezier through every point, control points pulled along the neighbour chord.
/// The curve still passes through each input point exactly.
pub fn smooth(points: &[(f64, f64)], tension: f64, samples_per_segment: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 || samples_per_segment < 2 {
        return points.to_vec();
    }

    // (previous-side, next-side) control point for each point
    let controls: Vec<((f64, f64), (f64, f64))> = (0..points.len())
        .map(|i| {
            let cur = points[i];
            let prev = if i == 0 { cur } else { points[i - 1] };
            let next = if i + 1 == points.len() { cur } else { points[i + 1] };
            let d01 = dist(prev, cur);
            let d12 = dist(cur, next);
            let total = d01 + d12;
            let (s01, s12) = if total > 0.0 { (d01 / total, d12 / total) } else { (0.0, 0.0) };
            let fa = tension * s01;
            let fb = tension * s12;
            let dx = next.0 - prev.0;
            let dy = next.1 - prev.1;
            (
                (cur.0 - fa * dx, cur.1 - fa * dy),
                (cur.0 + fb * dx, cur.1 + fb * dy),
            )
        })
        .collect();

    let mut out = Vec::with_capacity((points.len() - 1) * samples_per_segment + 1);
    for i in 0..points.len() - 1 {
        let p0 = points[i];
        let c0 = controls[i].1;
        let c1 = controls[i + 1].0;
        let p1 = points[i + 1];
        for s in 0..samples_per_segment {
            let t = s as f64 / samples_per_segment as f64;
            out.push(bezier(p0, c0, c1, p1, t));
        }
    }
    out.push(points[points.len() - 1]);
    out
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

fn bezier(p0: (f64, f64), c0: (f64, f64), c1: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * c0.0 + c * c1.0 + d * p1.0,
        a * p0.1 + b * c0.1 + c * c1.1 + d * p1.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_series_replaces_not_appends() {
        let mut w = ChartWidget::bar("Views", Color::Blue);
        w.set_series(vec!["/a".into(), "/b".into()], vec![5, 3]);
        w.set_series(vec!["/c".into()], vec![9]);
        assert_eq!(w.labels(), ["/c".to_string()]);
        assert_eq!(w.values(), [9]);
    }

    #[test]
    fn update_marks_dirty_once() {
        let mut w = ChartWidget::line("Page Views", Color::Green, 0.1);
        assert!(!w.take_dirty());
        w.update();
        assert_eq!(w.redraws(), 1);
        assert!(w.take_dirty());
        assert!(!w.take_dirty());
    }

    #[test]
    fn smoothed_curve_passes_through_points() {
        let pts = vec![(0.0, 1.0), (1.0, 7.0), (2.0, 3.0), (3.0, 4.0)];
        let out = smooth(&pts, 0.1, 4);
        assert_eq!(out.len(), 3 * 4 + 1);
        for (i, p) in pts.iter().enumerate() {
            assert_eq!(out[i * 4], *p);
        }
    }

    #[test]
    fn zero_tension_and_bars_are_not_smoothed() {
        let mut line = ChartWidget::line("l", Color::Green, 0.0);
        line.set_series(vec!["a".into(), "b".into(), "c".into()], vec![1, 2, 3]);
        assert_eq!(line.plot_points(8), vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);

        let mut bar = ChartWidget::bar("b", Color::Blue);
        bar.set_series(vec!["a".into(), "b".into(), "c".into()], vec![3, 2, 1]);
        assert_eq!(bar.plot_points(8).len(), 3);
    }
}
