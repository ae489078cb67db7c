//! Add command for recording a new work log.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Args;
use wl_core::{NewWorkLog, WorkLog};
use wl_db::Database;

use super::util::{format_log_day, open_database, parse_date_arg};
use crate::Config;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// What you worked on.
    #[arg(short = 'm', long = "message")]
    pub description: String,

    /// Tag for the entry. Repeat the flag or separate with commas.
    #[arg(short, long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Ticket reference (e.g. PROJ-123).
    #[arg(long)]
    pub ticket: Option<String>,

    /// When the work happened: YYYY-MM-DD, RFC 3339, "yesterday", "3 days ago".
    /// Defaults to now.
    #[arg(short, long)]
    pub date: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &AddArgs, config: &Config) -> Result<()> {
    let mut db = open_database(config)?;
    let log = add_log(&mut db, args, Utc::now(), &Local)?;
    writeln!(writer, "Logged {} for {}", log.id, format_log_day(&log, &Local))?;
    Ok(())
}

/// Validates the arguments and appends the log to the store.
pub fn add_log<Tz: TimeZone>(
    db: &mut Database,
    args: &AddArgs,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<WorkLog> {
    let date = match args.date.as_deref() {
        Some(value) => parse_date_arg(value, now, tz)?,
        None => now,
    };
    let draft = NewWorkLog::new(
        date,
        args.description.as_str(),
        args.tags.iter().map(String::as_str),
        args.ticket.clone(),
    )?;
    let log = db.create_log(&draft).context("failed to save work log")?;
    tracing::info!(log_id = %log.id, "recorded work log");
    Ok(log)
}
