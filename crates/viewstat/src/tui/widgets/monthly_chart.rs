//! Terminal rendering of a [`Figure`].

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};
use viewstat_graphs::{x_to_date, Figure, Rgba, SeriesKind};

/// Terminals have no alpha channel; only the RGB part is used.
pub fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// A figure drawn with braille markers, one dataset per series.
pub struct FigureChart<'a> {
    figure: &'a Figure,
}

impl<'a> FigureChart<'a> {
    pub fn new(figure: &'a Figure) -> Self {
        Self { figure }
    }

    fn x_labels(&self, bounds: (f64, f64)) -> Vec<String> {
        let mid = (bounds.0 + bounds.1) / 2.0;
        [bounds.0, mid, bounds.1]
            .iter()
            .map(|&x| {
                x_to_date(x)
                    .map(|date| self.figure.x_axis.label(date))
                    .unwrap_or_default()
            })
            .collect()
    }

    fn y_labels(bounds: (f64, f64)) -> Vec<String> {
        let mid = (bounds.0 + bounds.1) / 2.0;
        [bounds.0, mid, bounds.1]
            .iter()
            .map(|y| format!("{y:.1}"))
            .collect()
    }
}

impl Widget for FigureChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.figure.title));

        if self.figure.is_empty() {
            Paragraph::new("No data for this year")
                .block(block)
                .render(area, buf);
            return;
        }

        let data: Vec<Vec<(f64, f64)>> = self.figure.series.iter().map(|s| s.xy()).collect();
        let datasets: Vec<Dataset> = self
            .figure
            .series
            .iter()
            .zip(data.iter())
            .map(|(series, points)| {
                let graph_type = match series.kind {
                    SeriesKind::Line => GraphType::Line,
                    SeriesKind::Points => GraphType::Scatter,
                };
                Dataset::default()
                    .name(series.label.clone())
                    .marker(Marker::Braille)
                    .graph_type(graph_type)
                    .style(Style::default().fg(to_color(series.color)))
                    .data(points)
            })
            .collect();

        let x_bounds = self.figure.x_bounds();
        let y_bounds = self.figure.y_bounds();

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Line::from(self.figure.x_label.as_str()))
                    .bounds([x_bounds.0, x_bounds.1])
                    .labels(self.x_labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title(Line::from(self.figure.y_label.as_str()))
                    .bounds([y_bounds.0, y_bounds.1])
                    .labels(Self::y_labels(y_bounds)),
            );
        chart.render(area, buf);
    }
}
