//! Stats command: the dashboard view.
//!
//! Shows headline numbers (total logs, unique tags, current streak), a bar
//! chart of logs per day over a trailing window, and the most recent entries.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate, TimeZone};
use clap::Args;
use serde::Serialize;
use wl_core::{
    LogStats, MAX_WINDOW_DAYS, Session, User, WorkLog, bucket_by_day, chart_anchor, recent_logs,
};

use super::util::{format_log_day, open_database};
use crate::Config;

const BAR_WIDTH: usize = 10;
const DEFAULT_RECENT: usize = 5;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Number of days in the activity chart (defaults to `chart_days`).
    #[arg(long, value_parser = parse_window_days)]
    pub days: Option<usize>,

    /// Number of recent logs to show.
    #[arg(long, default_value_t = DEFAULT_RECENT)]
    pub recent: usize,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One day of the activity chart.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityDay {
    pub day: NaiveDate,
    pub label: String,
    pub count: usize,
}

/// Everything the dashboard shows.
#[derive(Debug, Serialize)]
pub struct Dashboard<'a> {
    pub user: Option<&'a User>,
    pub timezone: String,
    pub today: NaiveDate,
    #[serde(flatten)]
    pub stats: LogStats,
    pub activity: Vec<ActivityDay>,
    pub recent: Vec<&'a WorkLog>,
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &StatsArgs,
    config: &Config,
    session: &Session,
) -> Result<()> {
    let window_days = args.days.unwrap_or(config.chart_days);
    check_window_days(window_days)?;

    let db = open_database(config)?;
    let logs = db.list_logs()?;
    let today = Local::now().date_naive();
    let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());

    let dashboard = build_dashboard(
        &logs,
        window_days,
        args.recent,
        today,
        &Local,
        session,
        timezone,
    );
    render(writer, &dashboard, args.json, &Local)
}

/// Rejects chart windows outside `1..=MAX_WINDOW_DAYS`.
pub fn check_window_days(days: usize) -> Result<()> {
    if days == 0 {
        bail!("chart window must be at least 1 day");
    }
    if days > MAX_WINDOW_DAYS {
        bail!("chart window must be at most {MAX_WINDOW_DAYS} days, got {days}");
    }
    Ok(())
}

fn parse_window_days(value: &str) -> Result<usize, String> {
    let days: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number of days"))?;
    check_window_days(days).map_err(|err| err.to_string())?;
    Ok(days)
}

/// Computes the dashboard for `today` in `tz`.
pub fn build_dashboard<'a, Tz: TimeZone>(
    logs: &'a [WorkLog],
    window_days: usize,
    recent: usize,
    today: NaiveDate,
    tz: &Tz,
    session: &'a Session,
    timezone: String,
) -> Dashboard<'a> {
    let anchor = chart_anchor(logs, today, tz);
    let activity = bucket_by_day(logs, window_days, anchor, tz)
        .into_iter()
        .map(|bucket| ActivityDay {
            day: bucket.day,
            label: bucket.label(),
            count: bucket.count,
        })
        .collect();

    Dashboard {
        user: session.current_user(),
        timezone,
        today,
        stats: LogStats::compute(logs, today, tz),
        activity,
        recent: recent_logs(logs, recent),
    }
}

pub fn render<W, Tz>(writer: &mut W, dashboard: &Dashboard<'_>, json: bool, tz: &Tz) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(dashboard)?)?;
        return Ok(());
    }

    let owner = dashboard
        .user
        .map_or_else(|| "anonymous".to_string(), ToString::to_string);
    writeln!(writer, "Work log of {owner}")?;
    writeln!(writer, "Total logs:     {}", dashboard.stats.total_logs)?;
    writeln!(writer, "Unique tags:    {}", dashboard.stats.unique_tags)?;
    writeln!(
        writer,
        "Current streak: {}",
        format_streak(dashboard.stats.current_streak)
    )?;

    if let Some(last) = dashboard.activity.last() {
        writeln!(writer)?;
        writeln!(
            writer,
            "Activity ({} days ending {})",
            dashboard.activity.len(),
            last.label
        )?;
        let max = dashboard
            .activity
            .iter()
            .map(|day| day.count)
            .max()
            .unwrap_or(0);
        for day in &dashboard.activity {
            writeln!(
                writer,
                "{:<6}  {} {}",
                day.label,
                activity_bar(day.count, max),
                day.count
            )?;
        }
    }

    if !dashboard.recent.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Recent logs")?;
        for log in &dashboard.recent {
            writeln!(
                writer,
                "{:<12}  {} [{}]",
                format_log_day(log, tz),
                log.description,
                log.tags.join(", ")
            )?;
        }
    }
    Ok(())
}

/// Formats a streak as "1 Day" / "N Days".
pub fn format_streak(days: u32) -> String {
    if days == 1 {
        "1 Day".to_string()
    } else {
        format!("{days} Days")
    }
}

/// Generates a fixed-width bar scaled against the busiest day.
/// Non-zero values always get at least one block.
pub fn activity_bar(value: usize, max: usize) -> String {
    if max == 0 {
        return "░".repeat(BAR_WIDTH);
    }
    let mut filled = (value * BAR_WIDTH + max / 2) / max;
    if value > 0 && filled == 0 {
        filled = 1;
    }
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
