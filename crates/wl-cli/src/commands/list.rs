//! Timesheet command: list logs filtered by ticket and tags.

use std::io::Write;

use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::Args;
use wl_core::{LogFilter, WorkLog, filter_logs};

use super::util::{format_log_day, open_database};
use crate::Config;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only logs whose ticket contains this text (case-insensitive).
    #[arg(long)]
    pub ticket: Option<String>,

    /// Only logs carrying this tag. Repeat to require several tags.
    #[arg(short, long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn filter(&self) -> LogFilter {
        LogFilter::new(self.ticket.clone().unwrap_or_default(), self.tags.iter().cloned())
    }
}

pub fn run<W: Write>(writer: &mut W, args: &ListArgs, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let logs = db.list_logs()?;
    render(writer, &logs, args, &Local)
}

pub fn render<W, Tz>(writer: &mut W, logs: &[WorkLog], args: &ListArgs, tz: &Tz) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let filter = args.filter();
    let matched = filter_logs(logs, &filter);
    tracing::debug!(total = logs.len(), matched = matched.len(), "filtered logs");

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&matched)?)?;
        return Ok(());
    }

    if matched.is_empty() {
        writeln!(writer, "No logs found for the selected filters.")?;
        return Ok(());
    }

    writeln!(writer, "{:<12}  {:<10}  Description", "Date", "Ticket")?;
    for log in &matched {
        writeln!(
            writer,
            "{:<12}  {:<10}  {} [{}]",
            format_log_day(log, tz),
            log.ticket.as_deref().unwrap_or("-"),
            log.description,
            log.tags.join(", ")
        )?;
        writeln!(writer, "{:<12}  id: {}", "", log.id)?;
    }
    if filter.is_empty() {
        writeln!(writer, "{} logs", matched.len())?;
    } else {
        writeln!(writer, "{} of {} logs", matched.len(), logs.len())?;
    }
    Ok(())
}
