//! TripPlan - AI travel planner
//!
//! CLI entry point. With no subcommand, launches the interactive TUI; the
//! `plan` subcommand generates a single plan and prints it to stdout.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use tripplan::cli::{Cli, Command};
use tripplan::config::Config;
use tripplan::domain::{BudgetTier, TravelStyle, TripParameters};
use tripplan::planner;
use tripplan::tui;

fn setup_logging(verbose: bool, config_level: Option<String>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, never stdout/stderr (the TUI owns the terminal)
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        config_level
            .and_then(|l| tracing::Level::from_str(&l).ok())
            .unwrap_or(tracing::Level::INFO)
    };
    let log_file = fs::File::create(log_dir.join("tripplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.verbose, config_level).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(
        "TripPlan loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Plan {
            destination,
            days,
            budget,
            style,
        }) => cmd_plan(&config, destination, days, budget, style).await,
        None => tui::run(&config).await,
    }
}

/// Generate one plan non-interactively and print it
async fn cmd_plan(
    config: &Config,
    destination: String,
    days: u32,
    budget: BudgetTier,
    styles: Vec<TravelStyle>,
) -> Result<()> {
    info!(%destination, days, "cmd_plan: called");

    let mut params = TripParameters::new();
    params.destination = destination;
    params.set_duration(days);
    params.budget = budget;
    if !styles.is_empty() {
        params.set_styles(&styles);
    }

    let dispatcher = planner::build_dispatcher(config)?;
    let plan = dispatcher
        .generate_plan(&params)
        .await
        .context("Failed to generate travel plan")?;

    println!("{plan}");
    Ok(())
}
