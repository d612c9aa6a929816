//! Command-line argument parsing for SmartTask
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SmartTask - Turn a messy task list into a ranked priority queue
#[derive(Parser, Debug)]
#[command(name = "smarttask")]
#[command(version)]
#[command(about = "Score, rank, and explain task priorities", long_about = None)]
pub struct Args {
    /// Path to a JSON file with tasks to analyze ("-" reads stdin)
    #[arg(value_name = "TASKS_FILE")]
    pub tasks_file: Option<PathBuf>,

    /// Scoring strategy: smart, fastest, impact, deadline
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Score as if today were this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub reference_date: Option<String>,

    /// Print the full report as JSON instead of the table view
    #[arg(long)]
    pub json: bool,

    /// Verbosity level: -q (quiet), default (normal), -v (factor breakdown)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress warnings and decoration)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the top suggested tasks instead of the full ranking
    Suggest {
        /// Path to a JSON file with tasks ("-" reads stdin)
        #[arg(value_name = "TASKS_FILE", default_value = "-")]
        tasks_file: PathBuf,
    },

    /// Run the HTTP API server
    Serve {
        /// Bind address (config file value if omitted)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (config file value if omitted)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List available scoring strategies
    Strategies,

    /// Show or change persistent configuration
    Config {
        /// Set the default scoring strategy
        #[arg(long, value_name = "STRATEGY")]
        set_strategy: Option<String>,

        /// Clear the default scoring strategy
        #[arg(long)]
        clear_strategy: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose == 0 {
            Verbosity::Normal
        } else {
            Verbosity::Verbose
        }
    }

    /// Parse --reference-date into a date, if one was given
    pub fn parsed_reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// Check flag combinations that clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(date) = &self.reference_date {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(format!(
                    "Invalid --reference-date '{}'; expected YYYY-MM-DD.",
                    date
                ));
            }
        }

        // The analyze file is positional; subcommands take their own paths
        if self.command.is_some() && self.tasks_file.is_some() {
            return Err(
                "Cannot combine a tasks file with a subcommand; pass the file to the subcommand instead."
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
        }
    }

    /// Check if validation warnings should be printed
    pub fn show_warnings(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if per-factor breakdowns should be printed
    pub fn show_breakdown(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}
