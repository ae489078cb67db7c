//! Dashboard statistics.

use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::streak::compute_streak;
use crate::worklog::WorkLog;

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogStats {
    pub total_logs: usize,
    pub unique_tags: usize,
    pub current_streak: u32,
}

impl LogStats {
    pub fn compute<Tz: TimeZone>(logs: &[WorkLog], today: NaiveDate, tz: &Tz) -> Self {
        Self {
            total_logs: logs.len(),
            unique_tags: all_tags(logs).len(),
            current_streak: compute_streak(logs, today, tz),
        }
    }
}

/// Every distinct tag, sorted.
pub fn all_tags(logs: &[WorkLog]) -> Vec<String> {
    logs.iter()
        .flat_map(|log| log.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The `limit` most recent logs, newest first.
pub fn recent_logs(logs: &[WorkLog], limit: usize) -> Vec<&WorkLog> {
    let mut sorted: Vec<&WorkLog> = logs.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
