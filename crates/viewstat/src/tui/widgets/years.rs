//! Year selector sidebar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Years newest first; the cursor row is highlighted, the selected year marked.
pub struct YearList<'a> {
    years: &'a [i32],
    cursor: usize,
    selected: Option<i32>,
}

impl<'a> YearList<'a> {
    pub fn new(years: &'a [i32], cursor: usize, selected: Option<i32>) -> Self {
        Self {
            years,
            cursor,
            selected,
        }
    }
}

impl Widget for YearList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .years
            .iter()
            .map(|&year| {
                let marker = if Some(year) == self.selected { "● " } else { "  " };
                ListItem::new(format!("{marker}{year}"))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Year "))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD));

        let mut state = ListState::default();
        if !self.years.is_empty() {
            state.select(Some(self.cursor.min(self.years.len() - 1)));
        }
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
