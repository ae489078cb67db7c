//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use regex::Regex;
use wl_core::WorkLog;
use wl_core::day::{day_at_noon, parse_day, parse_log_date};
use wl_db::Database;

use crate::Config;

/// Pre-compiled regex for relative day parsing.
static RELATIVE_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative day parsing (~1000 years).
const MAX_RELATIVE_DAYS: u64 = 1000 * 365;

/// Parse a calendar day as `YYYY-MM-DD` or relative to `today`.
///
/// Supports:
/// - ISO dates: "2026-01-15"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
pub fn parse_day_arg(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = s.trim().to_lowercase();
    match input.as_str() {
        "today" => return Ok(today),
        "yesterday" => return today.pred_opt().context("date out of range"),
        _ => {}
    }

    if let Some(caps) = RELATIVE_DAY_RE.captures(&input) {
        let n: u64 = caps[1]
            .parse()
            .context("failed to parse number in relative date")?;
        let days = match &caps[2] {
            "day" => n,
            "week" => n.saturating_mul(7),
            unit => anyhow::bail!("Unknown date unit: {unit}"),
        };
        if days > MAX_RELATIVE_DAYS {
            anyhow::bail!("Relative date too far back: {s}");
        }
        return today
            .checked_sub_days(Days::new(days))
            .context("date out of range");
    }

    parse_day(&input).map_err(|_| {
        anyhow::anyhow!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2026-01-15), 'today', 'yesterday' or relative (e.g., '3 days ago')"
        )
    })
}

/// Parse a log date. RFC 3339 and `YYYY-MM-DD` go through
/// [`parse_log_date`]; keywords and relative days (see [`parse_day_arg`])
/// are placed at noon in `tz` the same way.
pub fn parse_date_arg<Tz: TimeZone>(s: &str, now: DateTime<Utc>, tz: &Tz) -> Result<DateTime<Utc>> {
    if let Ok(date) = parse_log_date(s, tz) {
        return Ok(date);
    }
    let today = now.with_timezone(tz).date_naive();
    let day = parse_day_arg(s, today)?;
    Ok(day_at_noon(day, tz))
}

/// Opens the configured database, creating its directory if needed.
pub fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))
}

/// Formats a log's day for tables, e.g. `Mar 5, 2025`.
pub fn format_log_day<Tz>(log: &WorkLog, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    log.date.with_timezone(tz).format("%b %-d, %Y").to_string()
}
