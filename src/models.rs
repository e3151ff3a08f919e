use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar month used to scope the stats aggregate, always in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Month(u8);

impl Month {
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        chrono::Month::try_from(self.0)
            .map(|month| month.name())
            .unwrap_or("--")
    }
}

/// Day of the week as the stats service indexes it: Sunday is 0, Saturday is 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

const DAY_NAMES: [(&str, &str); 7] = [
    ("Sunday", "Sun"),
    ("Monday", "Mon"),
    ("Tuesday", "Tue"),
    ("Wednesday", "Wed"),
    ("Thursday", "Thu"),
    ("Friday", "Fri"),
    ("Saturday", "Sat"),
];

impl DayOfWeek {
    pub const MONDAY: DayOfWeek = DayOfWeek(1);

    pub fn new(index: u8) -> Option<Self> {
        (index < 7).then_some(Self(index))
    }

    pub fn all() -> impl Iterator<Item = DayOfWeek> {
        (0..7).map(DayOfWeek)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        DAY_NAMES[self.0 as usize].0
    }

    pub fn short_name(self) -> &'static str {
        DAY_NAMES[self.0 as usize].1
    }
}

impl Default for DayOfWeek {
    fn default() -> Self {
        Self::MONDAY
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StatsSummary {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub total_customers: u64,
}

impl StatsSummary {
    pub fn validate(&self) -> Result<(), String> {
        if !self.total_revenue.is_finite() || self.total_revenue < 0.0 {
            return Err(format!(
                "total_revenue must be a non-negative amount, got {}",
                self.total_revenue
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Success,
    Other(String),
}

impl From<String> for ActivityKind {
    fn from(value: String) -> Self {
        if value == "success" {
            ActivityKind::Success
        } else {
            ActivityKind::Other(value)
        }
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Success => "success".to_string(),
            ActivityKind::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub time: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: String,
    pub sales: u64,
}

impl HourBucket {
    pub fn new(hour: impl Into<String>, sales: u64) -> Self {
        Self {
            hour: hour.into(),
            sales,
        }
    }
}

/// Hourly sales per weekday, in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(transparent)]
pub struct WeekdaySeries {
    days: BTreeMap<DayOfWeek, Vec<HourBucket>>,
}

impl WeekdaySeries {
    /// Builds the series from the wire map, rejecting keys outside `0..=6`.
    pub fn from_wire(raw: BTreeMap<u8, Vec<HourBucket>>) -> Result<Self, String> {
        let mut days = BTreeMap::new();
        for (index, buckets) in raw {
            let day = DayOfWeek::new(index)
                .ok_or_else(|| format!("weekday key {index} is outside 0..=6"))?;
            days.insert(day, buckets);
        }
        Ok(Self { days })
    }

    pub fn day(&self, day: DayOfWeek) -> &[HourBucket] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }
}

impl FromIterator<(DayOfWeek, Vec<HourBucket>)> for WeekdaySeries {
    fn from_iter<I: IntoIterator<Item = (DayOfWeek, Vec<HourBucket>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
