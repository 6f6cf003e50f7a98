//! Application state and event loop

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    DefaultTerminal,
};
use tracing::{info, warn};
use viewstat_config::ImageFormat;
use viewstat_graphs::{monthly_usage, FigureRenderer, PlottersRenderer};

use super::widgets::{
    help::HelpPopup, monthly_chart::FigureChart, watch_counts::WatchCountTable, years::YearList,
};
use crate::session::{Session, SessionEvent, View, ViewState};

/// Where the `s` key writes the monthly chart.
#[derive(Debug, Clone)]
pub struct SaveTarget {
    pub dir: PathBuf,
    pub format: ImageFormat,
}

/// Main application
pub struct App {
    session: Session,
    state: ViewState,
    cursor: usize,
    status: String,
    show_help: bool,
    should_quit: bool,
    save_target: SaveTarget,
}

impl App {
    pub fn new(session: Session, save_target: SaveTarget) -> Self {
        let status = if session.years().is_empty() {
            "No viewing records loaded".to_string()
        } else {
            "Select a year with Enter, ? for help".to_string()
        };
        Self {
            session,
            state: ViewState::default(),
            cursor: 0,
            status,
            show_help: false,
            should_quit: false,
            save_target,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key.code);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.session.years().len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(&year) = self.session.years().get(self.cursor) {
                    self.dispatch(SessionEvent::SelectYear(year));
                }
            }
            KeyCode::Char('m') => self.dispatch(SessionEvent::ToggleView(View::MonthlyUsage)),
            KeyCode::Char('w') => self.dispatch(SessionEvent::ToggleView(View::WatchCounts)),
            KeyCode::Char('s') => self.save_monthly_chart(),
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        match self.session.handle(event) {
            Ok(state) => {
                self.status = match state.year {
                    Some(year) => format!("{year}: {} records", state.record_count),
                    None => String::new(),
                };
                self.state = state;
            }
            Err(e) => {
                warn!("Rejected {:?}: {}", event, e);
                self.status = e.to_string();
            }
        }
    }

    fn save_monthly_chart(&mut self) {
        let Some(slice) = self.session.selected().cloned() else {
            self.status = "Select a year first".to_string();
            return;
        };

        let figure = self.session.monthly_figure(&slice);
        let path = self.save_target.dir.join(format!(
            "{}_{}.{}",
            monthly_usage::FILE_STEM,
            slice.year,
            self.save_target.format.extension()
        ));

        self.status = match PlottersRenderer::new().render_to_file(&figure, &path) {
            Ok(()) => {
                info!("Saved monthly chart to {}", path.display());
                format!("Saved {}", path.display())
            }
            Err(e) => {
                warn!("Could not save chart: {}", e);
                format!("Could not save chart: {e}")
            }
        };
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer) {
        let panels: Vec<View> = [View::MonthlyUsage, View::WatchCounts]
            .into_iter()
            .filter(|&view| self.state.is_visible(view))
            .collect();

        if panels.is_empty() {
            let hint = match self.state.year {
                Some(year) => format!("{year} selected. Press m for monthly usage, w for watch counts."),
                None => "Choose a year on the left.".to_string(),
            };
            Paragraph::new(hint)
                .block(Block::default().borders(Borders::ALL))
                .render(area, buf);
            return;
        }

        let constraints = vec![Constraint::Ratio(1, panels.len() as u32); panels.len()];
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (view, chunk) in panels.into_iter().zip(chunks.iter()) {
            match view {
                View::MonthlyUsage => {
                    if let Some(figure) = &self.state.monthly_figure {
                        FigureChart::new(figure).render(*chunk, buf);
                    }
                }
                View::WatchCounts => {
                    if let Some(summary) = &self.state.watch_counts {
                        WatchCountTable::new(summary).render(*chunk, buf);
                    }
                }
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let title = Line::from(vec![
            Span::styled(" viewstat ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("Netflix viewing history"),
        ]);
        Paragraph::new(title).render(rows[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Min(20)])
            .split(rows[1]);

        YearList::new(self.session.years(), self.cursor, self.state.year).render(columns[0], buf);
        self.render_body(columns[1], buf);

        Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::Yellow))
            .render(rows[2], buf);

        if self.show_help {
            HelpPopup.render(area, buf);
        }
    }
}

/// Run the dashboard until the user quits. Restores the terminal on every exit path.
pub fn run(session: Session, save_target: SaveTarget) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, App::new(session, save_target));
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| frame.render_widget(&app, frame.area()))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(250))? {
            app.handle_event(event::read()?);
        }
    }
    Ok(())
}
