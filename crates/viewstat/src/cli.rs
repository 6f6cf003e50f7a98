//! Command-line interface.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use viewstat_common::{init_logging, LogTarget, LoggingConfig, LoggingGuard};
use viewstat_config::{Config, ConfigLoader, ImageFormat};
use viewstat_graphs::{
    monthly_usage, usage_by_date, FigureRenderer, MonthlyUsageChart, PlottersRenderer,
    UsageByDateChart,
};
use viewstat_history::{
    available_years, count_show_watches, select_year, sum_usage_by_date_and_device,
    HistoryLoader, NormalizedViewingRecord, TablePrinter,
};

use crate::error::AppError;
use crate::session::Session;
use crate::tui::{self, SaveTarget};

/// Netflix viewing-history explorer
#[derive(Parser, Debug)]
#[command(name = "viewstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// ViewingActivity.csv export, overrides the configured path
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive dashboard (default)
    Tui,

    /// Print the usage and watch-count tables
    Report {
        /// Only records whose month falls in this year
        #[arg(long)]
        year: Option<i32>,

        /// Print every row
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write both charts to image files
    Plot {
        /// Only records whose month falls in this year
        #[arg(long)]
        year: Option<i32>,

        /// Output directory, overrides the configured one
        #[arg(long)]
        out: Option<PathBuf>,

        /// Image format, overrides the configured one
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// List the years with viewing records
    Years,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for ImageFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Svg => ImageFormat::Svg,
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let mut config = ConfigLoader::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        if let Some(history) = &self.history {
            config.data.history_path = history.clone();
        }

        let dashboard = matches!(self.command, None | Some(Commands::Tui));
        let _guard = self.init_logging(&config, dashboard)?;
        debug!(?config, "Configuration loaded");

        let records = HistoryLoader::new()
            .load(&config.data.history_path)
            .with_context(|| {
                format!(
                    "Failed to load viewing history from {}",
                    config.data.history_path.display()
                )
            })?;

        match self.command {
            None | Some(Commands::Tui) => {
                let chart = MonthlyUsageChart::from_config(&config.charts)?;
                let session = Session::new(records, chart);
                tui::run(
                    session,
                    SaveTarget {
                        dir: config.output.dir.clone(),
                        format: config.output.format,
                    },
                )
            }
            Some(Commands::Report { year, all, json }) => {
                let records = filter_year(records, year)?;
                let usage = sum_usage_by_date_and_device(&records);
                let counts = count_show_watches(&records);

                if json {
                    let report = serde_json::json!({
                        "usage_by_date_and_device": usage,
                        "watch_counts": counts,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    return Ok(());
                }

                let printer =
                    TablePrinter::from_flags(all || config.tables.display_all, config.tables.max_rows);
                let mut out = std::io::stdout().lock();

                writeln!(out, "Usage by date and device")?;
                printer.print(&usage, &mut out)?;
                writeln!(out)?;
                writeln!(out, "Watch counts by show and profile")?;
                printer.print(&counts, &mut out)?;
                Ok(())
            }
            Some(Commands::Plot { year, out, format }) => {
                let records = filter_year(records, year)?;
                let dir = out.unwrap_or_else(|| config.output.dir.clone());
                let format = format.map(ImageFormat::from).unwrap_or(config.output.format);

                if config.tables.verbose {
                    let printer =
                        TablePrinter::from_flags(config.tables.display_all, config.tables.max_rows);
                    printer.print(
                        &sum_usage_by_date_and_device(&records),
                        &mut std::io::stdout().lock(),
                    )?;
                }

                let renderer = PlottersRenderer::new();
                let usage = UsageByDateChart::from_config(&config.charts)?.build(&records);
                let usage_path = chart_path(&dir, usage_by_date::FILE_STEM, year, format);
                renderer.render_to_file(&usage, &usage_path)?;

                let monthly = MonthlyUsageChart::from_config(&config.charts)?.build(&records);
                let monthly_path = chart_path(&dir, monthly_usage::FILE_STEM, year, format);
                renderer.render_to_file(&monthly, &monthly_path)?;

                info!("Wrote {} and {}", usage_path.display(), monthly_path.display());
                println!("{}", usage_path.display());
                println!("{}", monthly_path.display());
                Ok(())
            }
            Some(Commands::Years) => {
                for year in available_years(&records) {
                    println!("{year}");
                }
                Ok(())
            }
        }
    }

    fn init_logging(&self, config: &Config, dashboard: bool) -> anyhow::Result<LoggingGuard> {
        let level = if self.debug {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        };
        let target = if dashboard {
            LogTarget::File(config.logging.file.clone())
        } else {
            LogTarget::Stderr
        };

        init_logging(LoggingConfig {
            level,
            json_format: config.logging.json,
            target,
            ..LoggingConfig::default()
        })
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
    }
}

fn filter_year(
    records: Vec<NormalizedViewingRecord>,
    year: Option<i32>,
) -> Result<Vec<NormalizedViewingRecord>, AppError> {
    let Some(year) = year else {
        return Ok(records);
    };
    let selected = select_year(&records, year);
    if selected.is_empty() {
        return Err(AppError::UnknownYear(year));
    }
    Ok(selected)
}

fn chart_path(dir: &Path, stem: &str, year: Option<i32>, format: ImageFormat) -> PathBuf {
    let name = match year {
        Some(year) => format!("{stem}_{year}.{}", format.extension()),
        None => format!("{stem}.{}", format.extension()),
    };
    dir.join(name)
}
