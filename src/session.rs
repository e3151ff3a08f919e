use crate::aggregates::DaySummary;
use crate::carousel::{Carousel, Slide};
use crate::client::StatsSource;
use crate::filters::{FilterState, LimitRequest, MonthRequest};
use crate::models::{DayOfWeek, Month};
use crate::weekday::WeekdayState;
use serde::Serialize;
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};

#[derive(Debug, Clone)]
pub struct ViewState {
    pub carousel: Carousel,
    pub filters: FilterState,
    pub weekday: WeekdayState,
}

/// Point-in-time copy of the view state, with the derived day summary.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub slide: Slide,
    pub carousel: Carousel,
    pub filters: FilterState,
    pub weekday: WeekdayState,
    pub day_summary: DaySummary,
}

/// Session view state and the source it refreshes from. The state lock is
/// never held while a fetch is in flight.
#[derive(Clone)]
pub struct Session {
    source: Arc<dyn StatsSource>,
    view: Arc<Mutex<ViewState>>,
}

impl Session {
    pub fn new(source: Arc<dyn StatsSource>, limit: u32) -> Self {
        Self {
            source,
            view: Arc::new(Mutex::new(ViewState {
                carousel: Carousel::new(Slide::ALL.len()),
                filters: FilterState::new(limit),
                weekday: WeekdayState::default(),
            })),
        }
    }

    /// Initial load: all-time stats, activity and the weekday series.
    pub async fn mount(&self) {
        let request = self.begin_mount().await;
        self.run_mount(request).await;
    }

    pub async fn spawn_mount(&self) -> JoinHandle<()> {
        let request = self.begin_mount().await;
        let session = self.clone();
        tokio::spawn(async move { session.run_mount(request).await })
    }

    pub async fn select_month(&self, month: Option<Month>) {
        let request = self.view.lock().await.filters.select_month(month);
        self.run_month(request).await;
    }

    /// Applies the selection now and leaves the fetches to a background task.
    pub async fn spawn_select_month(&self, month: Option<Month>) -> JoinHandle<()> {
        let request = self.view.lock().await.filters.select_month(month);
        let session = self.clone();
        tokio::spawn(async move { session.run_month(request).await })
    }

    pub async fn set_limit_draft(&self, input: &str) -> u32 {
        self.view.lock().await.filters.set_limit_draft(input)
    }

    pub async fn commit_limit(&self) {
        let request = self.view.lock().await.filters.commit_limit();
        self.run_limit(request).await;
    }

    pub async fn spawn_commit_limit(&self) -> JoinHandle<()> {
        let request = self.view.lock().await.filters.commit_limit();
        let session = self.clone();
        tokio::spawn(async move { session.run_limit(request).await })
    }

    pub async fn select_day(&self, day: DayOfWeek) {
        self.view.lock().await.weekday.select_day(day);
    }

    pub async fn next_slide(&self) {
        self.view.lock().await.carousel.next();
    }

    pub async fn prev_slide(&self) {
        self.view.lock().await.carousel.prev();
    }

    pub async fn jump_to_slide(&self, index: usize) {
        self.view.lock().await.carousel.jump_to(index);
    }

    pub async fn snapshot(&self) -> Snapshot {
        let view = self.view.lock().await;
        Snapshot {
            slide: Slide::ALL[view.carousel.current()],
            carousel: view.carousel.clone(),
            filters: view.filters.clone(),
            weekday: view.weekday.clone(),
            day_summary: view.weekday.summary(),
        }
    }

    async fn begin_mount(&self) -> MonthRequest {
        let mut view = self.view.lock().await;
        view.weekday.begin_load();
        view.filters.select_month(None)
    }

    async fn run_mount(&self, request: MonthRequest) {
        tokio::join!(self.run_month(request), self.load_weekday_series());
    }

    async fn run_month(&self, request: MonthRequest) {
        tokio::join!(
            async {
                let result = self.source.fetch_stats(request.month).await;
                self.view.lock().await.filters.apply_stats(request.stats, result);
            },
            async {
                let result = self.source.fetch_activity(request.limit).await;
                self.view
                    .lock()
                    .await
                    .filters
                    .apply_activity(request.activity, result);
            },
        );
        self.view.lock().await.filters.settle(request.load);
    }

    async fn run_limit(&self, request: LimitRequest) {
        let result = self.source.fetch_activity(request.limit).await;
        self.view
            .lock()
            .await
            .filters
            .apply_activity(request.activity, result);
    }

    async fn load_weekday_series(&self) {
        let result = self.source.fetch_weekday_series().await;
        self.view.lock().await.weekday.apply_series(result);
    }
}
