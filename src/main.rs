//! SmartTask - Main CLI Entry Point

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use smarttask::analysis;
use smarttask::cli::{read_batch, Args, Commands};
use smarttask::config::Config;
use smarttask::display;
use smarttask::scoring::Strategy;
use smarttask::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(message) = args.validate() {
        eprintln!("{} {}", "Error:".red().bold(), message);
        std::process::exit(2);
    }

    match &args.command {
        Some(Commands::Suggest { tasks_file }) => {
            run_suggest(&args, tasks_file)?;
        }
        Some(Commands::Serve { host, port }) => {
            run_serve(host.clone(), *port).await?;
        }
        Some(Commands::Strategies) => {
            display::render_strategies();
        }
        Some(Commands::Config {
            set_strategy,
            clear_strategy,
        }) => {
            run_config(set_strategy.as_deref(), *clear_strategy)?;
        }
        None => {
            if let Some(path) = &args.tasks_file {
                run_analyze(&args, path)?;
            } else {
                print_usage();
            }
        }
    }

    Ok(())
}

fn run_analyze(args: &Args, path: &Path) -> Result<()> {
    let config = Config::load()?;
    let mut request = read_batch(path)?;

    // Strategy precedence: flag, then batch envelope, then config default
    if let Some(strategy) = &args.strategy {
        request.strategy = Some(strategy.clone());
    } else if request.strategy.is_none() {
        request.strategy = config.scoring.default_strategy.clone();
    }

    let today = args
        .parsed_reference_date()
        .unwrap_or_else(|| Local::now().date_naive());
    let report = analysis::analyze_tasks(&request, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display::render_report(&report, args.verbosity());
    }

    Ok(())
}

fn run_suggest(args: &Args, path: &Path) -> Result<()> {
    let config = Config::load()?;
    let request = read_batch(path)?;

    let strategy_name = args
        .strategy
        .clone()
        .or_else(|| request.strategy.clone())
        .or_else(|| config.scoring.default_strategy.clone());
    let strategy = Strategy::from_name(strategy_name.as_deref());

    let today = args
        .parsed_reference_date()
        .unwrap_or_else(|| Local::now().date_naive());
    let raw = request.tasks.unwrap_or_default();
    let report = analysis::suggest_from_batch(&raw, strategy, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display::render_suggestions(&report, args.verbosity());
    }

    Ok(())
}

async fn run_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = Config::load()?;

    let host = host.unwrap_or_else(|| config.server_host().to_string());
    let port = port.unwrap_or_else(|| config.server_port());
    let state = AppState {
        default_strategy: config.scoring.default_strategy.clone(),
    };

    server::serve(&host, port, state).await?;
    Ok(())
}

fn run_config(set_strategy: Option<&str>, clear_strategy: bool) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(name) = set_strategy {
        if Strategy::ALL.iter().all(|s| s.name() != name) {
            eprintln!(
                "{} Unknown strategy '{}'. Known: smart, fastest, impact, deadline.",
                "Error:".red().bold(),
                name
            );
            std::process::exit(2);
        }
        config.set_default_strategy(name.to_string());
        config.save()?;
        println!("{} Default strategy set to '{}'", "✓".green(), name);
    } else if clear_strategy {
        config.clear_default_strategy();
        config.save()?;
        println!("{} Default strategy cleared", "✓".green());
    } else {
        show_config(&config);
    }

    Ok(())
}

fn show_config(config: &Config) {
    println!();
    println!("SmartTask Configuration");
    if let Ok(path) = Config::config_path() {
        println!("  File:             {}", path.display());
    }
    println!(
        "  Default strategy: {}",
        config
            .scoring
            .default_strategy
            .as_deref()
            .unwrap_or("smart (built-in)")
    );
    println!("  Server host:      {}", config.server_host());
    println!("  Server port:      {}", config.server_port());
    println!();
}

fn print_usage() {
    println!("SmartTask - Task Prioritization Engine");
    println!("\nUsage:");
    println!("  smarttask <TASKS_FILE>          Rank a task batch from a JSON file");
    println!("  smarttask suggest [TASKS_FILE]  Print the top three suggestions");
    println!("  smarttask serve                 Run the HTTP API server");
    println!("  smarttask strategies            List scoring strategies");
    println!("  smarttask config                Show configuration");
    println!("\nExample:");
    println!("  smarttask tasks.json --strategy deadline --json");
    println!();
}
