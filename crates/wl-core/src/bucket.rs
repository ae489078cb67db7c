//! Per-day log counts over a trailing window, for the activity chart.

use chrono::{Days, NaiveDate, TimeZone};
use serde::Serialize;

use crate::day::calendar_day;
use crate::worklog::WorkLog;

/// Largest chart window the CLI accepts, roughly ten years.
pub const MAX_WINDOW_DAYS: usize = 3660;

/// Number of logs on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub day: NaiveDate,
    pub count: usize,
}

impl DayBucket {
    /// Short chart label, e.g. `Jan 5`.
    pub fn label(&self) -> String {
        self.day.format("%b %-d").to_string()
    }
}

/// Buckets logs into `window_days` consecutive days ending at `anchor`.
///
/// Buckets are ordered oldest first and every day of the window is present,
/// even with a count of 0. Logs outside the window are ignored. A window
/// reaching back past [`NaiveDate::MIN`] is truncated there, so callers that
/// need exactly `window_days` buckets should bound the window (see
/// [`MAX_WINDOW_DAYS`]).
pub fn bucket_by_day<Tz: TimeZone>(
    logs: &[WorkLog],
    window_days: usize,
    anchor: NaiveDate,
    tz: &Tz,
) -> Vec<DayBucket> {
    if window_days == 0 {
        return Vec::new();
    }
    let span = u64::try_from(window_days - 1).unwrap_or(u64::MAX);
    let start = anchor.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);

    let mut buckets: Vec<DayBucket> = start
        .iter_days()
        .take_while(|day| *day <= anchor)
        .map(|day| DayBucket { day, count: 0 })
        .collect();

    for log in logs {
        let offset = (log.day(tz) - start).num_days();
        let Ok(index) = usize::try_from(offset) else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.count += 1;
        }
    }
    buckets
}

/// The day a chart window ends on: the most recent log's day, or `today`
/// when there are no logs.
pub fn chart_anchor<Tz: TimeZone>(logs: &[WorkLog], today: NaiveDate, tz: &Tz) -> NaiveDate {
    logs.iter()
        .map(|log| log.date)
        .max()
        .map_or(today, |latest| calendar_day(&latest, tz))
}
