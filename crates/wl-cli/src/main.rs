use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{add, ask, edit, feedback, list, stats, tags};
use wl_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let session = config.session().context("invalid user identity in configuration")?;

    let mut stdout = io::stdout().lock();
    match command {
        Commands::Add(args) => add::run(&mut stdout, args, &config)?,
        Commands::Edit(args) => edit::run(&mut stdout, args, &config)?,
        Commands::List(args) => list::run(&mut stdout, args, &config)?,
        Commands::Tags => tags::run(&mut stdout, &config)?,
        Commands::Stats(args) => stats::run(&mut stdout, args, &config, &session)?,
        Commands::Ask(args) => ask::run(&mut stdout, args, &config)?,
        Commands::Feedback(args) => feedback::run(&mut stdout, args, &config, &session)?,
    }

    Ok(())
}
