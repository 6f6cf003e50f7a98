//! Key binding overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const BINDINGS: [(&str, &str); 7] = [
    ("↑/k ↓/j", "Move year cursor"),
    ("Enter", "Select year"),
    ("m", "Toggle monthly usage chart"),
    ("w", "Toggle watch counts"),
    ("s", "Save monthly chart to a file"),
    ("?", "Toggle this help"),
    ("q/Esc", "Quit"),
];

pub struct HelpPopup;

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [popup] = Layout::horizontal([Constraint::Length(46)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(BINDINGS.len() as u16 + 2)])
            .flex(Flex::Center)
            .areas(popup);

        let text: Vec<String> = BINDINGS
            .iter()
            .map(|(key, action)| format!("{key:<10} {action}"))
            .collect();

        Clear.render(popup, buf);
        Paragraph::new(text.join("\n"))
            .block(Block::default().borders(Borders::ALL).title(" Keys "))
            .render(popup, buf);
    }
}
