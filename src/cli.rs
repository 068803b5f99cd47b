//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{BudgetTier, TravelStyle};

/// TripPlan - AI travel planner
#[derive(Parser)]
#[command(
    name = "tripplan",
    about = "AI travel planner with live web search",
    version,
    after_help = "Logs are written to: ~/.local/share/tripplan/logs/tripplan.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a plan non-interactively and print it to stdout
    Plan {
        /// Where to go
        #[arg(value_name = "DESTINATION")]
        destination: String,

        /// Trip length in days (1-30)
        #[arg(short, long, default_value = "5")]
        days: u32,

        /// Budget tier (budget, moderate, luxury)
        #[arg(short, long, default_value = "moderate")]
        budget: BudgetTier,

        /// Travel styles (repeatable); defaults to culture and nature
        #[arg(short, long, value_name = "STYLE")]
        style: Vec<TravelStyle>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_subcommand_args() {
        let cli = Cli::parse_from([
            "tripplan", "plan", "Kyoto", "--days", "3", "--budget", "luxury", "--style", "food", "--style",
            "culture",
        ]);

        match cli.command {
            Some(Command::Plan {
                destination,
                days,
                budget,
                style,
            }) => {
                assert_eq!(destination, "Kyoto");
                assert_eq!(days, 3);
                assert_eq!(budget, BudgetTier::Luxury);
                assert_eq!(style, vec![TravelStyle::Food, TravelStyle::Culture]);
            }
            _ => panic!("expected plan subcommand"),
        }
    }

    #[test]
    fn test_plan_subcommand_defaults() {
        let cli = Cli::parse_from(["tripplan", "plan", "Lisbon"]);

        match cli.command {
            Some(Command::Plan {
                days, budget, style, ..
            }) => {
                assert_eq!(days, 5);
                assert_eq!(budget, BudgetTier::Moderate);
                assert!(style.is_empty());
            }
            _ => panic!("expected plan subcommand"),
        }
    }
}
