use crate::models::visa_stat::VisaStat;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of most recent waiting-time values reported in the summary.
const LAST_N: usize = 10;

/// Time window over `visa_issue_date`. Records without an issue date
/// fall out of any bounded window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1month")]
    LastMonth,
    #[serde(rename = "6months")]
    LastSixMonths,
}

impl Period {
    fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::All => None,
            Period::LastMonth => today.checked_sub_months(Months::new(1)),
            Period::LastSixMonths => today.checked_sub_months(Months::new(6)),
        }
    }
}

/// Filter predicates over the enumerable fields plus the time window.
/// `None` or an empty string means no restriction; active predicates
/// AND together.
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub city: Option<String>,
    pub visa_center: Option<String>,
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitingSummary {
    pub mean: f64,
    pub max: i64,
    pub min: i64,
    pub last_ten: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub average_waiting_days: f64,
}

fn field_matches(selected: Option<&str>, value: &str) -> bool {
    match selected {
        None | Some("") => true,
        Some(wanted) => value == wanted,
    }
}

/// `today` is passed in by the caller so window cutoffs stay
/// deterministic under test.
pub fn filter_stats(
    mut stats: Vec<VisaStat>,
    filter: &StatsFilter,
    today: NaiveDate,
) -> Vec<VisaStat> {
    let cutoff = filter.period.cutoff(today);
    stats.retain(|stat| {
        field_matches(filter.city.as_deref(), &stat.city)
            && field_matches(filter.visa_center.as_deref(), &stat.visa_center)
            && match cutoff {
                None => true,
                Some(cutoff) => stat
                    .visa_issue_date
                    .map(|issued| issued >= cutoff)
                    .unwrap_or(false),
            }
    });
    stats
}

/// Mean, max, min and the last ten `waiting_days` values in input
/// order. Empty input yields the all-zero summary, never an error.
pub fn summarize(stats: &[VisaStat]) -> WaitingSummary {
    if stats.is_empty() {
        return WaitingSummary {
            mean: 0.0,
            max: 0,
            min: 0,
            last_ten: Vec::new(),
        };
    }

    let waits: Vec<i64> = stats.iter().map(|s| s.waiting_days).collect();
    let sum: i64 = waits.iter().sum();
    let mean = sum as f64 / waits.len() as f64;
    let max = *waits.iter().max().unwrap_or(&0);
    let min = *waits.iter().min().unwrap_or(&0);
    let last_ten = waits
        .iter()
        .skip(waits.len().saturating_sub(LAST_N))
        .copied()
        .collect();

    WaitingSummary {
        mean,
        max,
        min,
        last_ten,
    }
}

/// Average waiting time bucketed by application date, ascending. Ties
/// in date collapse into one bucket.
pub fn series_by_date(stats: &[VisaStat]) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<NaiveDate, (i64, u32)> = BTreeMap::new();
    for stat in stats {
        let bucket = buckets.entry(stat.visa_application_date).or_insert((0, 0));
        bucket.0 += stat.waiting_days;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (total, count))| SeriesPoint {
            date,
            average_waiting_days: total as f64 / count as f64,
        })
        .collect()
}
