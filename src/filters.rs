use crate::errors::FetchError;
use crate::models::{ActivityEntry, Month, StatsSummary};
use serde::Serialize;
use tracing::{debug, warn};

/// Identifies one fetch trigger. Tokens only grow, so the highest one issued
/// for a slot is the only result that slot still accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, Default)]
struct Tokens {
    issued: u64,
    stats: RequestToken,
    activity: RequestToken,
    load: RequestToken,
}

impl Tokens {
    fn next(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }
}

/// Fetches owed after a month selection.
#[derive(Debug, Clone, Copy)]
pub struct MonthRequest {
    pub month: Option<Month>,
    pub limit: u32,
    pub stats: RequestToken,
    pub activity: RequestToken,
    pub load: RequestToken,
}

/// Fetch owed after a committed limit.
#[derive(Debug, Clone, Copy)]
pub struct LimitRequest {
    pub limit: u32,
    pub activity: RequestToken,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterState {
    selected_month: Option<Month>,
    limit_draft: u32,
    limit: u32,
    loading: bool,
    stats: StatsSummary,
    activity: Vec<ActivityEntry>,
    stats_error: Option<String>,
    activity_error: Option<String>,
    #[serde(skip)]
    tokens: Tokens,
}

impl FilterState {
    pub fn new(limit: u32) -> Self {
        Self {
            selected_month: None,
            limit_draft: limit,
            limit,
            loading: false,
            stats: StatsSummary::default(),
            activity: Vec::new(),
            stats_error: None,
            activity_error: None,
            tokens: Tokens::default(),
        }
    }

    /// Starts a load cycle for `month`. Both stats and activity are owed, and
    /// the typed limit is applied along with it.
    pub fn select_month(&mut self, month: Option<Month>) -> MonthRequest {
        self.selected_month = month;
        self.limit = self.limit_draft;
        self.loading = true;

        let stats = self.tokens.next();
        let activity = self.tokens.next();
        let load = self.tokens.next();
        self.tokens.stats = stats;
        self.tokens.activity = activity;
        self.tokens.load = load;

        MonthRequest {
            month,
            limit: self.limit,
            stats,
            activity,
            load,
        }
    }

    /// Buffers typed limit input without fetching. Returns the coerced value.
    pub fn set_limit_draft(&mut self, input: &str) -> u32 {
        self.limit_draft = parse_limit(input);
        self.limit_draft
    }

    pub fn commit_limit(&mut self) -> LimitRequest {
        self.limit = self.limit_draft;
        let activity = self.tokens.next();
        self.tokens.activity = activity;

        LimitRequest {
            limit: self.limit,
            activity,
        }
    }

    /// Applies a stats result if `token` is still current. Failures keep the
    /// previous summary. Returns whether the result was taken.
    pub fn apply_stats(
        &mut self,
        token: RequestToken,
        result: Result<StatsSummary, FetchError>,
    ) -> bool {
        if token != self.tokens.stats {
            debug!(?token, current = ?self.tokens.stats, "discarding stale stats response");
            return false;
        }

        match result {
            Ok(stats) => {
                self.stats = stats;
                self.stats_error = None;
            }
            Err(err) => {
                warn!("failed to fetch stats: {err}");
                self.stats_error = Some(err.to_string());
            }
        }
        true
    }

    pub fn apply_activity(
        &mut self,
        token: RequestToken,
        result: Result<Vec<ActivityEntry>, FetchError>,
    ) -> bool {
        if token != self.tokens.activity {
            debug!(?token, current = ?self.tokens.activity, "discarding stale activity response");
            return false;
        }

        match result {
            Ok(activity) => {
                self.activity = activity;
                self.activity_error = None;
            }
            Err(err) => {
                warn!("failed to fetch recent activity: {err}");
                self.activity_error = Some(err.to_string());
            }
        }
        true
    }

    /// Marks both fetches of a load cycle as settled. Only the latest cycle
    /// clears the loading flag.
    pub fn settle(&mut self, load: RequestToken) {
        if load == self.tokens.load {
            self.loading = false;
        }
    }

    pub fn selected_month(&self) -> Option<Month> {
        self.selected_month
    }

    pub fn limit_draft(&self) -> u32 {
        self.limit_draft
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn stats(&self) -> &StatsSummary {
        &self.stats
    }

    pub fn activity(&self) -> &[ActivityEntry] {
        &self.activity
    }

    pub fn stats_error(&self) -> Option<&str> {
        self.stats_error.as_deref()
    }

    pub fn activity_error(&self) -> Option<&str> {
        self.activity_error.as_deref()
    }
}

/// Coerces limit input to a count. Anything that is not a non-negative number
/// becomes 0; fractional values are truncated.
pub fn parse_limit(input: &str) -> u32 {
    let input = input.trim();
    if let Ok(limit) = input.parse::<u32>() {
        return limit;
    }

    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::STATS_PATH;
    use crate::models::ActivityKind;

    fn stats(total_sales: u64) -> StatsSummary {
        StatsSummary {
            total_revenue: 10.0,
            total_sales,
            total_customers: 2,
        }
    }

    fn unavailable() -> FetchError {
        FetchError::Status {
            endpoint: STATS_PATH,
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn entry(description: &str) -> ActivityEntry {
        ActivityEntry {
            time: "10:00".into(),
            description: description.into(),
            kind: ActivityKind::Success,
        }
    }

    #[test]
    fn limit_input_coerces_invalid_to_zero() {
        assert_eq!(parse_limit(""), 0);
        assert_eq!(parse_limit("abc"), 0);
        assert_eq!(parse_limit("-4"), 0);
        assert_eq!(parse_limit(" 25 "), 25);
        assert_eq!(parse_limit("7.9"), 7);
    }

    #[test]
    fn draft_does_not_change_applied_limit_until_commit() {
        let mut state = FilterState::new(10);
        state.set_limit_draft("3");
        assert_eq!(state.limit(), 10);
        assert_eq!(state.limit_draft(), 3);

        let request = state.commit_limit();
        assert_eq!(request.limit, 3);
        assert_eq!(state.limit(), 3);
    }

    #[test]
    fn month_selection_sets_loading_until_settled() {
        let mut state = FilterState::new(10);
        let request = state.select_month(Month::new(5));
        assert!(state.is_loading());
        assert_eq!(request.month, Month::new(5));
        assert_eq!(request.limit, 10);

        assert!(state.apply_stats(request.stats, Ok(stats(4))));
        assert!(state.is_loading());
        assert!(state.apply_activity(request.activity, Ok(vec![entry("sale")])));
        state.settle(request.load);
        assert!(!state.is_loading());
        assert_eq!(state.stats().total_sales, 4);
    }

    #[test]
    fn failed_stats_keeps_previous_value() {
        let mut state = FilterState::new(10);
        let first = state.select_month(None);
        state.apply_stats(first.stats, Ok(stats(8)));
        state.settle(first.load);

        let second = state.select_month(Month::new(6));
        state.apply_stats(second.stats, Err(unavailable()));
        state.apply_activity(second.activity, Ok(vec![entry("new")]));
        state.settle(second.load);

        assert!(!state.is_loading());
        assert_eq!(state.stats().total_sales, 8);
        assert!(state.stats_error().is_some());
        assert_eq!(state.activity()[0].description, "new");
        assert!(state.activity_error().is_none());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = FilterState::new(10);
        let old = state.select_month(Month::new(5));
        let new = state.select_month(Month::new(6));

        assert!(state.apply_stats(new.stats, Ok(stats(6))));
        assert!(state.apply_activity(new.activity, Ok(vec![entry("june")])));
        state.settle(new.load);

        assert!(!state.apply_stats(old.stats, Ok(stats(5))));
        assert!(!state.apply_activity(old.activity, Ok(vec![entry("may")])));
        state.settle(old.load);

        assert_eq!(state.stats().total_sales, 6);
        assert_eq!(state.activity()[0].description, "june");
        assert!(!state.is_loading());
    }

    #[test]
    fn older_cycle_settling_does_not_clear_loading() {
        let mut state = FilterState::new(10);
        let old = state.select_month(Month::new(5));
        let _new = state.select_month(Month::new(6));
        state.settle(old.load);
        assert!(state.is_loading());
    }

    #[test]
    fn commit_supersedes_in_flight_activity() {
        let mut state = FilterState::new(10);
        let month = state.select_month(None);
        state.set_limit_draft("2");
        let commit = state.commit_limit();

        assert!(!state.apply_activity(month.activity, Ok(vec![entry("ten")])));
        assert!(state.apply_activity(commit.activity, Ok(vec![entry("two")])));
        assert!(state.apply_stats(month.stats, Ok(stats(1))));
        assert_eq!(state.activity()[0].description, "two");
    }
}
