//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::add::AddArgs;
use crate::commands::ask::AskArgs;
use crate::commands::edit::EditArgs;
use crate::commands::feedback::FeedbackArgs;
use crate::commands::list::ListArgs;
use crate::commands::stats::StatsArgs;

/// Personal work log.
///
/// Record what you worked on, filter it into a timesheet, keep a daily
/// streak going and ask a language model about past work.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a new work log.
    Add(AddArgs),

    /// Change an existing work log.
    Edit(EditArgs),

    /// Show the timesheet, optionally filtered by ticket and tags.
    List(ListArgs),

    /// List every tag in use.
    Tags,

    /// Show totals, current streak and recent activity.
    Stats(StatsArgs),

    /// Ask a question about the logs in a date range.
    Ask(AskArgs),

    /// Send feedback to the configured recipient.
    Feedback(FeedbackArgs),
}
