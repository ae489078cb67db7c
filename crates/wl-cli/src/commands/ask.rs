//! Ask command: questions about a range of work logs.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, TimeZone};
use clap::Args;
use wl_core::{DateRange, WorkLog, logs_in_range, render_review_context};
use wl_llm::ReviewRequest;

use super::util::{open_database, parse_day_arg};
use crate::Config;

#[derive(Debug, Args)]
pub struct AskArgs {
    /// What to ask about the selected logs.
    pub question: String,

    /// First day of the range: YYYY-MM-DD, "yesterday", "1 week ago".
    #[arg(long)]
    pub from: String,

    /// Last day of the range (inclusive). Defaults to `--from`.
    #[arg(long)]
    pub to: Option<String>,

    /// Model override for this question.
    #[arg(long)]
    pub model: Option<String>,

    /// Print the prepared log context instead of calling the model.
    #[arg(long)]
    pub context_only: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &AskArgs, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let logs = db.list_logs()?;
    let today = Local::now().date_naive();
    let request = prepare_request(&logs, args, today, &Local)?;

    if args.context_only {
        writeln!(writer, "{}", request.work_logs)?;
        return Ok(());
    }

    let Some(api_key) = config.resolve_api_key() else {
        bail!("no API key configured (set WL_API_KEY or ANTHROPIC_API_KEY)");
    };
    let client = wl_llm::Client::new(api_key)?;
    let model = args.model.as_deref().unwrap_or(&config.model);

    tracing::debug!(model, "asking about work logs");
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let answer = runtime
        .block_on(client.generate(model, &request))
        .context("failed to generate review")?;

    writeln!(writer, "{answer}")?;
    Ok(())
}

/// Selects the logs in the requested range and builds the model request.
pub fn prepare_request<Tz>(
    logs: &[WorkLog],
    args: &AskArgs,
    today: NaiveDate,
    tz: &Tz,
) -> Result<ReviewRequest>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let question = args.question.trim();
    if question.is_empty() {
        bail!("question cannot be empty");
    }

    let range = parse_range(args, today)?;
    let selected = logs_in_range(logs, &range, tz);
    tracing::debug!(
        from = %range.from(),
        to = %range.to(),
        selected = selected.len(),
        "selected logs for review"
    );
    if selected.is_empty() {
        bail!("no logs in selected range");
    }

    Ok(ReviewRequest {
        work_logs: render_review_context(selected, tz),
        question: question.to_string(),
    })
}

fn parse_range(args: &AskArgs, today: NaiveDate) -> Result<DateRange> {
    let from = parse_day_arg(&args.from, today)?;
    let to = args
        .to
        .as_deref()
        .map(|value| parse_day_arg(value, today))
        .transpose()?;
    Ok(DateRange::new(from, to)?)
}
