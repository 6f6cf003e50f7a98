//! Watch-count table panel.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table, Widget},
};
use viewstat_common::truncate_string;
use viewstat_history::WatchCountSummary;

/// Most-watched shows first; rows beyond the panel height are cut.
pub struct WatchCountTable<'a> {
    summary: &'a WatchCountSummary,
}

impl<'a> WatchCountTable<'a> {
    pub fn new(summary: &'a WatchCountSummary) -> Self {
        Self { summary }
    }
}

impl Widget for WatchCountTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec!["Show", "Profile", "Count"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let visible = usize::from(area.height.saturating_sub(3));
        let rows: Vec<Row> = self
            .summary
            .rows()
            .iter()
            .take(visible)
            .map(|row| {
                Row::new(vec![
                    truncate_string(&row.short_title, 40),
                    truncate_string(&row.profile_name, 16),
                    row.count.to_string(),
                ])
            })
            .collect();

        let title = format!(
            " Watch counts: {} shows, {} views ",
            self.summary.len(),
            self.summary.total_count()
        );
        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(16),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

        Widget::render(table, area, buf);
    }
}
