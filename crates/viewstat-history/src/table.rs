//! Plain-text rendering of summary tables.

use crate::aggregator::{MonthlyUsageRow, UsageSummary, WatchCountSummary};
use comfy_table::{presets::UTF8_FULL_CONDENSED, CellAlignment, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;
use viewstat_common::{format_minutes, Result};

/// Rows shown at each end of a truncated table.
pub const EDGE_ROWS: usize = 5;

/// A summary that can be printed as a table.
pub trait Tabular {
    fn column_names(&self) -> Vec<&'static str>;

    /// Cell text, row by row, in display order.
    fn cells(&self) -> Vec<Vec<String>>;
}

impl Tabular for UsageSummary {
    fn column_names(&self) -> Vec<&'static str> {
        vec!["Start Date", "Device Type", "Duration (min)", "Duration"]
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows()
            .iter()
            .map(|row| {
                vec![
                    row.start_date.to_string(),
                    row.device_type.clone(),
                    format!("{:.2}", row.duration_minutes),
                    format_minutes(row.duration_minutes),
                ]
            })
            .collect()
    }
}

impl Tabular for WatchCountSummary {
    fn column_names(&self) -> Vec<&'static str> {
        vec!["Short Title", "Profile Name", "Count"]
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows()
            .iter()
            .map(|row| vec![row.short_title.clone(), row.profile_name.clone(), row.count.to_string()])
            .collect()
    }
}

impl Tabular for [MonthlyUsageRow] {
    fn column_names(&self) -> Vec<&'static str> {
        vec!["Month", "Device Type", "Hours"]
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|row| {
                vec![
                    row.month_begin.format("%Y-%m").to_string(),
                    row.device_type.clone(),
                    format!("{:.2}", row.duration_minutes / 60.0),
                ]
            })
            .collect()
    }
}

/// How many rows a printed table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// First and last few rows once the table exceeds `max_rows`.
    #[default]
    Truncated,
    All,
}

/// Formats `Tabular` values. Never changes the content or order of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePrinter {
    pub mode: DisplayMode,
    pub max_rows: usize,
}

impl Default for TablePrinter {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Truncated,
            max_rows: 60,
        }
    }
}

impl TablePrinter {
    pub fn new(mode: DisplayMode, max_rows: usize) -> Self {
        Self { mode, max_rows }
    }

    /// Printer for the `tables.display_all` flag.
    pub fn from_flags(display_all: bool, max_rows: usize) -> Self {
        let mode = if display_all {
            DisplayMode::All
        } else {
            DisplayMode::Truncated
        };
        Self::new(mode, max_rows)
    }

    fn is_truncated(&self, row_count: usize) -> bool {
        self.mode == DisplayMode::Truncated && row_count > self.max_rows.max(2 * EDGE_ROWS)
    }

    /// Render `table` as a bordered text table. Numeric columns are right-aligned.
    pub fn format<T: Tabular + ?Sized>(&self, table: &T) -> String {
        let headers = table.column_names();
        let cells = table.cells();
        let truncated = self.is_truncated(cells.len());

        let mut out = Table::new();
        out.load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.iter().copied());

        for (index, column) in out.column_iter_mut().enumerate() {
            let numeric =
                !cells.is_empty() && cells.iter().all(|row| row[index].parse::<f64>().is_ok());
            if numeric {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }

        if truncated {
            for row in &cells[..EDGE_ROWS] {
                out.add_row(row);
            }
            out.add_row(vec!["..."; headers.len()]);
            for row in &cells[cells.len() - EDGE_ROWS..] {
                out.add_row(row);
            }
        } else {
            for row in &cells {
                out.add_row(row);
            }
        }

        let mut text = out.to_string();
        text.push('\n');
        if truncated {
            text.push('\n');
            text.push_str(&format!("[{} rows x {} columns]\n", cells.len(), headers.len()));
        }
        text
    }

    /// Write the formatted table to `writer`.
    pub fn print<T: Tabular + ?Sized, W: Write>(&self, table: &T, writer: &mut W) -> Result<()> {
        writer.write_all(self.format(table).as_bytes())?;
        Ok(())
    }
}
