use crate::models::{DayOfWeek, HourBucket, WeekdaySeries};
use serde::Serialize;

pub const NO_PEAK_LABEL: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub total: u64,
    pub peak: HourBucket,
    pub average: u64,
}

pub fn summarize(buckets: &[HourBucket]) -> DaySummary {
    DaySummary {
        total: total_sales(buckets),
        peak: peak_hour(buckets),
        average: average_per_hour(buckets),
    }
}

pub fn total_sales(buckets: &[HourBucket]) -> u64 {
    buckets
        .iter()
        .fold(0u64, |sum, bucket| sum.saturating_add(bucket.sales))
}

/// First bucket holding the highest sales count, or a `"--"` placeholder for an
/// empty day.
pub fn peak_hour(buckets: &[HourBucket]) -> HourBucket {
    let mut peak: Option<&HourBucket> = None;
    for bucket in buckets {
        if peak.is_none_or(|best| bucket.sales > best.sales) {
            peak = Some(bucket);
        }
    }

    peak.cloned()
        .unwrap_or_else(|| HourBucket::new(NO_PEAK_LABEL, 0))
}

/// Mean sales per listed hour, rounded half up. An empty day averages to 0.
pub fn average_per_hour(buckets: &[HourBucket]) -> u64 {
    if buckets.is_empty() {
        return 0;
    }

    let total = u128::from(total_sales(buckets));
    let count = buckets.len() as u128;
    ((total * 2 + count) / (count * 2)) as u64
}

/// Weekday with the highest daily total; earlier days win ties. `None` when no
/// day has any sales.
pub fn busiest_day(series: &WeekdaySeries) -> Option<(DayOfWeek, u64)> {
    let mut busiest: Option<(DayOfWeek, u64)> = None;
    for day in DayOfWeek::all() {
        let total = total_sales(series.day(day));
        if total > busiest.map_or(0, |(_, best)| best) {
            busiest = Some((day, total));
        }
    }
    busiest
}
