//! Line chart for one or more sequences

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub struct Series {
    pub name: &'static str,
    pub points: Vec<(f64, f64)>,
    pub color: Color,
}

impl Series {
    pub fn new(name: &'static str, points: Vec<(f64, f64)>, color: Color) -> Self {
        Self {
            name,
            points,
            color,
        }
    }
}

/// Axis bounds covering every point, with a little headroom on y.
pub fn bounds(series: &[Series]) -> ([f64; 2], [f64; 2]) {
    let mut x = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y = [f64::INFINITY, f64::NEG_INFINITY];
    for &(px, py) in series.iter().flat_map(|s| s.points.iter()) {
        x = [x[0].min(px), x[1].max(px)];
        y = [y[0].min(py), y[1].max(py)];
    }

    if !x[0].is_finite() {
        x = [-1.0, 1.0];
    } else if x[0] >= x[1] {
        x = [x[0] - 1.0, x[1] + 1.0];
    }
    if !y[0].is_finite() {
        y = [-1.0, 1.0];
    } else {
        let pad = ((y[1] - y[0]) * 0.1).max(0.1);
        y = [y[0] - pad, y[1] + pad];
    }
    (x, y)
}

pub fn render_chart(frame: &mut Frame, area: Rect, title: &str, series: &[Series]) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL);

    let (x, y) = bounds(series);

    let datasets = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(&s.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(x)
                .labels([format!("{:.1}", x[0]), format!("{:.1}", x[1])])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds(y)
                .labels([format!("{:.2}", y[0]), format!("{:.2}", y[1])])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
