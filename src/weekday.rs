use crate::aggregates::{summarize, DaySummary};
use crate::errors::FetchError;
use crate::models::{DayOfWeek, HourBucket, WeekdaySeries};
use serde::Serialize;
use tracing::warn;

/// Selected weekday plus the series it slices. The series is fetched once;
/// picking another day never goes back to the network.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeekdayState {
    selected_day: DayOfWeek,
    loading: bool,
    series: WeekdaySeries,
    error: Option<String>,
}

impl WeekdayState {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn apply_series(&mut self, result: Result<WeekdaySeries, FetchError>) {
        self.loading = false;
        match result {
            Ok(series) => {
                self.series = series;
                self.error = None;
            }
            Err(err) => {
                warn!("failed to fetch weekday analysis: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn select_day(&mut self, day: DayOfWeek) {
        self.selected_day = day;
    }

    pub fn selected_day(&self) -> DayOfWeek {
        self.selected_day
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn series(&self) -> &WeekdaySeries {
        &self.series
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_slice(&self) -> &[HourBucket] {
        self.series.day(self.selected_day)
    }

    pub fn summary(&self) -> DaySummary {
        summarize(self.current_slice())
    }
}
