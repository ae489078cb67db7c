//! Feedback command.
//!
//! Messages are queued as JSON lines in the outbox file next to the database.
//! The file is locked while appending so concurrent invocations don't
//! interleave lines.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Args;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use wl_core::Session;

use crate::Config;

#[derive(Debug, Args)]
pub struct FeedbackArgs {
    /// The feedback message.
    pub message: String,
}

/// One queued feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub recipient: String,
    pub from: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &FeedbackArgs,
    config: &Config,
    session: &Session,
) -> Result<()> {
    let entry = send_feedback(config, session, &args.message, Utc::now())?;
    writeln!(writer, "Feedback sent to {}.", entry.recipient)?;
    Ok(())
}

/// Validates the message and appends it to the outbox.
pub fn send_feedback(
    config: &Config,
    session: &Session,
    message: &str,
    now: DateTime<Utc>,
) -> Result<OutboxEntry> {
    let message = message.trim();
    if message.is_empty() {
        bail!("feedback message cannot be empty");
    }
    let Some(recipient) = config
        .feedback_recipient
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
    else {
        bail!(
            "feedback recipient is not configured (set WL_FEEDBACK_RECIPIENT or feedback_recipient in config.toml)"
        );
    };

    let entry = OutboxEntry {
        recipient: recipient.to_string(),
        from: session.sender(),
        message: message.to_string(),
        sent_at: now,
    };
    append_entry(&config.outbox_path, &entry)?;
    tracing::info!(recipient = %entry.recipient, from = %entry.from, "queued feedback");
    Ok(entry)
}

fn append_entry(outbox: &Path, entry: &OutboxEntry) -> Result<()> {
    if let Some(parent) = outbox.parent() {
        fs::create_dir_all(parent).context("failed to create outbox directory")?;
    }

    let lock_path = outbox.with_extension("lock");
    let lock_file = File::create(&lock_path).context("failed to create lock file")?;
    lock_file
        .lock_exclusive()
        .context("failed to acquire lock")?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(outbox)
        .context("failed to open outbox")?;

    let json = serde_json::to_string(entry).context("failed to serialize feedback")?;
    writeln!(file, "{json}").context("failed to write feedback")?;

    Ok(())
}
