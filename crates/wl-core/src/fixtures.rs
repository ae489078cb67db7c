//! Test fixtures shared by the unit tests in this crate.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::types::LogId;
use crate::worklog::WorkLog;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A log at `hour`:00 UTC on `date`.
pub fn log_on(id: &str, date: NaiveDate, hour: i64) -> WorkLog {
    let ts: DateTime<Utc> = date.and_hms_opt(0, 0, 0).unwrap().and_utc() + Duration::hours(hour);
    WorkLog {
        id: LogId::new(id).unwrap(),
        date: ts,
        description: format!("work for {id}"),
        tags: vec!["general".to_string()],
        ticket: None,
    }
}

pub fn tagged(id: &str, tags: &[&str], ticket: Option<&str>) -> WorkLog {
    let mut log = log_on(id, day(2025, 1, 15), 9);
    log.tags = tags.iter().map(ToString::to_string).collect();
    log.ticket = ticket.map(ToString::to_string);
    log
}
