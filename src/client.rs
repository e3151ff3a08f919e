use crate::errors::FetchError;
use crate::models::{ActivityEntry, HourBucket, Month, StatsSummary, WeekdaySeries};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::{collections::BTreeMap, time::Duration};
use tracing::debug;

pub const STATS_PATH: &str = "/getStats/stats";
pub const ACTIVITY_PATH: &str = "/overviewSection/recent-activity";
pub const WEEKDAY_PATH: &str = "/weekdayAnalysis/weekdayAnalysis";

/// Read side of the remote stats service.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Totals for `month`, or all-time totals when `month` is `None`.
    async fn fetch_stats(&self, month: Option<Month>) -> Result<StatsSummary, FetchError>;

    async fn fetch_activity(&self, limit: u32) -> Result<Vec<ActivityEntry>, FetchError>;

    async fn fetch_weekday_series(&self) -> Result<WeekdaySeries, FetchError>;
}

#[derive(Clone)]
pub struct HttpStatsClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStatsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn stats_url(&self, month: Option<Month>) -> String {
        match month {
            Some(month) => format!("{}{STATS_PATH}?month={}", self.base_url, month.number()),
            None => format!("{}{STATS_PATH}", self.base_url),
        }
    }

    pub fn activity_url(&self, limit: u32) -> String {
        format!("{}{ACTIVITY_PATH}?limit={limit}", self.base_url)
    }

    pub fn weekday_url(&self) -> String {
        format!("{}{WEEKDAY_PATH}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, FetchError> {
        debug!(%url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        serde_json::from_slice(&body).map_err(|err| FetchError::Malformed {
            endpoint,
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl StatsSource for HttpStatsClient {
    async fn fetch_stats(&self, month: Option<Month>) -> Result<StatsSummary, FetchError> {
        let stats: StatsSummary = self.get_json(STATS_PATH, &self.stats_url(month)).await?;
        stats
            .validate()
            .map_err(|reason| FetchError::Malformed {
                endpoint: STATS_PATH,
                reason,
            })?;
        Ok(stats)
    }

    async fn fetch_activity(&self, limit: u32) -> Result<Vec<ActivityEntry>, FetchError> {
        self.get_json(ACTIVITY_PATH, &self.activity_url(limit)).await
    }

    async fn fetch_weekday_series(&self) -> Result<WeekdaySeries, FetchError> {
        let raw: BTreeMap<u8, Vec<HourBucket>> =
            self.get_json(WEEKDAY_PATH, &self.weekday_url()).await?;
        WeekdaySeries::from_wire(raw).map_err(|reason| FetchError::Malformed {
            endpoint: WEEKDAY_PATH,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpStatsClient {
        HttpStatsClient::new("http://127.0.0.1:8000/", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn stats_url_omits_month_for_all_time() {
        assert_eq!(client().stats_url(None), "http://127.0.0.1:8000/getStats/stats");
        assert_eq!(
            client().stats_url(Month::new(5)),
            "http://127.0.0.1:8000/getStats/stats?month=5"
        );
    }

    #[test]
    fn activity_url_sends_zero_limit_verbatim() {
        assert_eq!(
            client().activity_url(0),
            "http://127.0.0.1:8000/overviewSection/recent-activity?limit=0"
        );
    }
}
