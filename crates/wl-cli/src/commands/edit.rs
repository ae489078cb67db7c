//! Edit command for replacing fields of an existing log.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Args;
use wl_core::{LogId, WorkLog};
use wl_db::Database;

use super::util::{open_database, parse_date_arg};
use crate::Config;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the log to edit.
    pub id: String,

    /// New description.
    #[arg(short = 'm', long = "message")]
    pub description: Option<String>,

    /// Replace all tags. Repeat the flag or separate with commas.
    #[arg(short, long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// New ticket reference.
    #[arg(long, conflicts_with = "clear_ticket")]
    pub ticket: Option<String>,

    /// Remove the ticket reference.
    #[arg(long)]
    pub clear_ticket: bool,

    /// New date: YYYY-MM-DD, RFC 3339, "yesterday", "3 days ago".
    #[arg(short, long)]
    pub date: Option<String>,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        self.description.is_some()
            || !self.tags.is_empty()
            || self.ticket.is_some()
            || self.clear_ticket
            || self.date.is_some()
    }
}

pub fn run<W: Write>(writer: &mut W, args: &EditArgs, config: &Config) -> Result<()> {
    let mut db = open_database(config)?;
    let log = edit_log(&mut db, args, Utc::now(), &Local)?;
    writeln!(writer, "Updated {}", log.id)?;
    Ok(())
}

/// Applies the requested changes and replaces the stored record.
pub fn edit_log<Tz: TimeZone>(
    db: &mut Database,
    args: &EditArgs,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<WorkLog> {
    if !args.has_changes() {
        bail!("nothing to change; pass at least one of --message, --tag, --ticket, --clear-ticket, --date");
    }
    let id = LogId::new(args.id.as_str())?;
    let Some(mut log) = db.get_log(&id)? else {
        bail!("work log not found: {id}");
    };

    if let Some(description) = &args.description {
        log.description.clone_from(description);
    }
    if !args.tags.is_empty() {
        log.tags.clone_from(&args.tags);
    }
    if args.clear_ticket {
        log.ticket = None;
    } else if let Some(ticket) = &args.ticket {
        log.ticket = Some(ticket.clone());
    }
    if let Some(date) = args.date.as_deref() {
        log.date = parse_date_arg(date, now, tz)?;
    }

    let log = log.validated()?;
    db.replace_log(&log).context("failed to update work log")?;
    tracing::info!(log_id = %log.id, "updated work log");
    Ok(log)
}

#[cfg(test)]
mod tests {
    use wl_core::NewWorkLog;

    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-01-15T08:00:00Z".parse().unwrap()
    }

    fn seeded() -> (Database, WorkLog) {
        let mut db = Database::open_in_memory().unwrap();
        let draft = NewWorkLog::new(now(), "Initial", ["a", "b"], Some("T-1".to_string())).unwrap();
        let log = db.create_log(&draft).unwrap();
        (db, log)
    }

    fn args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            description: None,
            tags: Vec::new(),
            ticket: None,
            clear_ticket: false,
            date: None,
        }
    }

    #[test]
    fn edit_replaces_only_requested_fields() {
        let (mut db, log) = seeded();
        let mut input = args(log.id.as_str());
        input.description = Some("Revised".to_string());
        input.clear_ticket = true;

        let edited = edit_log(&mut db, &input, now(), &Utc).unwrap();

        assert_eq!(edited.id, log.id);
        assert_eq!(edited.description, "Revised");
        assert_eq!(edited.tags, log.tags);
        assert_eq!(edited.ticket, None);
        assert_eq!(db.get_log(&log.id).unwrap(), Some(edited));
    }

    #[test]
    fn edit_replaces_tags_and_date() {
        let (mut db, log) = seeded();
        let mut input = args(log.id.as_str());
        input.tags = vec!["c".to_string(), " c ".to_string()];
        input.date = Some("2026-01-01".to_string());

        let edited = edit_log(&mut db, &input, now(), &Utc).unwrap();
        assert_eq!(edited.tags, vec!["c"]);
        assert_eq!(
            edited.date,
            "2026-01-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn edit_rejects_unknown_id() {
        let (mut db, _) = seeded();
        let mut input = args("missing");
        input.description = Some("x".to_string());
        let err = edit_log(&mut db, &input, now(), &Utc).unwrap_err();
        assert!(err.to_string().contains("work log not found: missing"));
    }

    #[test]
    fn edit_requires_a_change() {
        let (mut db, log) = seeded();
        let err = edit_log(&mut db, &args(log.id.as_str()), now(), &Utc).unwrap_err();
        assert!(err.to_string().contains("nothing to change"));
    }

    #[test]
    fn edit_keeps_entry_rules() {
        let (mut db, log) = seeded();
        let mut input = args(log.id.as_str());
        input.description = Some("   ".to_string());
        let err = edit_log(&mut db, &input, now(), &Utc).unwrap_err();
        assert!(err.to_string().contains("description cannot be empty"));
        assert_eq!(db.get_log(&log.id).unwrap(), Some(log));
    }
}
