//! Dashboard session: year selection, view toggles, and cached derived views.
//!
//! A [`Session`] owns the loaded records and every cache. Each
//! [`SessionEvent`] produces a fresh immutable [`ViewState`]; a rejected event
//! leaves the previous state in place.

use crate::cache::{DatasetVersion, PlotCache, WatchCountCache};
use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use viewstat_graphs::{Figure, MonthlyUsageChart};
use viewstat_history::{
    available_years, count_show_watches, select_year, NormalizedViewingRecord, WatchCountSummary,
};

/// Records of one year, shared by every view built from them.
#[derive(Debug, Clone)]
pub struct YearSlice {
    pub year: i32,
    pub version: DatasetVersion,
    pub records: Arc<Vec<NormalizedViewingRecord>>,
}

/// An optional dashboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    MonthlyUsage,
    WatchCounts,
}

/// Input to [`Session::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SelectYear(i32),
    ToggleView(View),
}

/// What the dashboard shows after an event.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub year: Option<i32>,
    pub show_monthly: bool,
    pub show_watch_counts: bool,
    /// Records in the selected year.
    pub record_count: usize,
    /// Present exactly when `show_monthly` is on.
    pub monthly_figure: Option<Arc<Figure>>,
    /// Present exactly when `show_watch_counts` is on.
    pub watch_counts: Option<Arc<WatchCountSummary>>,
}

impl ViewState {
    pub fn is_visible(&self, view: View) -> bool {
        match view {
            View::MonthlyUsage => self.show_monthly,
            View::WatchCounts => self.show_watch_counts,
        }
    }
}

/// State machine behind the dashboard. Starts with no year selected.
#[derive(Debug)]
pub struct Session {
    records: Vec<NormalizedViewingRecord>,
    years: Vec<i32>,
    slices: HashMap<i32, YearSlice>,
    next_version: u64,
    selected: Option<YearSlice>,
    show_monthly: bool,
    show_watch_counts: bool,
    monthly_chart: MonthlyUsageChart,
    plot_cache: PlotCache,
    watch_cache: WatchCountCache,
    state: ViewState,
}

impl Session {
    pub fn new(records: Vec<NormalizedViewingRecord>, monthly_chart: MonthlyUsageChart) -> Self {
        let years = available_years(&records);
        info!("Session started with {} records across {} years", records.len(), years.len());
        Self {
            records,
            years,
            slices: HashMap::new(),
            next_version: 0,
            selected: None,
            show_monthly: false,
            show_watch_counts: false,
            monthly_chart,
            plot_cache: PlotCache::new(),
            watch_cache: WatchCountCache::new(),
            state: ViewState::default(),
        }
    }

    /// Years with records, newest first.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn records(&self) -> &[NormalizedViewingRecord] {
        &self.records
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selected(&self) -> Option<&YearSlice> {
        self.selected.as_ref()
    }

    pub fn plot_cache(&self) -> &PlotCache {
        &self.plot_cache
    }

    pub fn watch_cache(&self) -> &WatchCountCache {
        &self.watch_cache
    }

    /// Apply one event and return the resulting view state.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: SessionEvent) -> AppResult<ViewState> {
        match event {
            SessionEvent::SelectYear(year) => {
                let slice = self.year_slice(year)?;
                self.selected = Some(slice);
            }
            SessionEvent::ToggleView(view) => {
                if self.selected.is_none() {
                    return Err(AppError::NoYearSelected);
                }
                match view {
                    View::MonthlyUsage => self.show_monthly = !self.show_monthly,
                    View::WatchCounts => self.show_watch_counts = !self.show_watch_counts,
                }
            }
        }

        self.state = self.build_state();
        Ok(self.state.clone())
    }

    /// The slice for `year`, filtered once and reused afterwards.
    pub fn year_slice(&mut self, year: i32) -> AppResult<YearSlice> {
        if let Some(slice) = self.slices.get(&year) {
            return Ok(slice.clone());
        }

        let records = select_year(&self.records, year);
        if records.is_empty() {
            return Err(AppError::UnknownYear(year));
        }

        self.next_version += 1;
        let slice = YearSlice {
            year,
            version: DatasetVersion::new(self.next_version),
            records: Arc::new(records),
        };
        debug!(year, version = self.next_version, "Filtered {} records", slice.records.len());
        self.slices.insert(year, slice.clone());
        Ok(slice)
    }

    /// Monthly usage figure for `slice`, built at most once per slice version.
    pub fn monthly_figure(&mut self, slice: &YearSlice) -> Arc<Figure> {
        let chart = &self.monthly_chart;
        self.plot_cache
            .get_or_build(slice.version, || chart.build(&slice.records))
    }

    /// Watch counts for `slice`, computed at most once per slice version.
    pub fn watch_counts(&self, slice: &YearSlice) -> Arc<WatchCountSummary> {
        self.watch_cache
            .get_or_compute(slice.version, || count_show_watches(&slice.records))
    }

    fn build_state(&mut self) -> ViewState {
        let Some(slice) = self.selected.clone() else {
            return ViewState::default();
        };

        let monthly_figure = self.show_monthly.then(|| self.monthly_figure(&slice));
        let watch_counts = self.show_watch_counts.then(|| self.watch_counts(&slice));

        ViewState {
            year: Some(slice.year),
            show_monthly: self.show_monthly,
            show_watch_counts: self.show_watch_counts,
            record_count: slice.records.len(),
            monthly_figure,
            watch_counts,
        }
    }
}
