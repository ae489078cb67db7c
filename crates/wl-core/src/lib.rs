//! Core domain logic for the work log.
//!
//! This crate contains the fundamental types and logic for:
//! - Work logs: the record type and its entry validation
//! - Statistics: current streak, tag counts, recent entries
//! - Timesheet filtering by ticket and tags
//! - Per-day activity buckets for charts
//! - Review context: selecting a day range and rendering it for an LLM

mod bucket;
pub mod day;
mod filter;
mod review;
mod session;
mod stats;
mod streak;
pub mod types;
mod worklog;

#[cfg(test)]
mod fixtures;

pub use bucket::{DayBucket, MAX_WINDOW_DAYS, bucket_by_day, chart_anchor};
pub use day::calendar_day;
pub use filter::{LogFilter, filter_logs};
pub use review::{DateRange, logs_in_range, render_review_context};
pub use session::{Session, User};
pub use stats::{LogStats, all_tags, recent_logs};
pub use streak::compute_streak;
pub use types::{LogId, ValidationError};
pub use worklog::{NewWorkLog, WorkLog};
