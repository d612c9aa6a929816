//! Terminal rendering for analysis reports
//!
//! List-style output with color-coded priorities. All functions print to
//! stdout; JSON output is handled by the caller instead.

use colored::*;

use crate::analysis::{AnalyzeResponse, SuggestResponse};
use crate::cli::Verbosity;
use crate::scoring::Strategy;
use crate::types::Priority;

/// Print a ranked analysis report.
pub fn render_report(report: &AnalyzeResponse, verbosity: Verbosity) {
    println!();
    println!(
        "{} {}",
        "Task Analysis".bold(),
        format!("(strategy: {})", report.strategy.name()).dimmed()
    );

    render_warnings(&report.warnings, verbosity);
    render_cycles(&report.cycles);

    if report.tasks.is_empty() {
        println!();
        println!("No tasks to rank.");
        return;
    }

    println!();
    for (rank, task) in report.tasks.iter().enumerate() {
        println!(
            "  {:>2}. [{}] {:.3}  {} ({})",
            rank + 1,
            priority_label(task.priority),
            task.score,
            truncate(&task.title, 48),
            task.id
        );
        if verbosity.show_breakdown() {
            let b = &task.breakdown;
            println!(
                "      {}",
                format!(
                    "urgency {:.3}  importance {:.3}  effort {:.3}  dependency {:.3}",
                    b.urgency, b.importance, b.effort, b.dependency
                )
                .dimmed()
            );
            println!("      {}", task.explanation.dimmed());
        }
    }
    println!();
}

/// Print the top suggestions with their explanations.
pub fn render_suggestions(report: &SuggestResponse, verbosity: Verbosity) {
    println!();
    println!(
        "{} {}",
        "Top Suggestions".bold(),
        format!("(strategy: {})", report.strategy.name()).dimmed()
    );

    render_warnings(&report.warnings, verbosity);
    render_cycles(&report.cycles);

    if report.suggestions.is_empty() {
        println!();
        println!("Nothing to suggest.");
        return;
    }

    println!();
    for (rank, suggestion) in report.suggestions.iter().enumerate() {
        println!(
            "  {}. [{}] {:.3}  {} ({})",
            rank + 1,
            priority_label(suggestion.priority),
            suggestion.score,
            truncate(&suggestion.title, 48),
            suggestion.id
        );
        println!("     {}", suggestion.explanation.dimmed());
    }
    println!();
}

/// Print the strategy catalog with weights.
pub fn render_strategies() {
    println!();
    println!("{}", "Scoring strategies".bold());
    println!();
    for strategy in Strategy::ALL {
        let weights = strategy.weights();
        println!(
            "  {} {}",
            format!("{:<10}", strategy.name()).cyan(),
            strategy.description()
        );
        println!(
            "             {}",
            format!(
                "urgency {:.2}  importance {:.2}  effort {:.2}  dependency {:.2}",
                weights.urgency, weights.importance, weights.effort, weights.dependency
            )
            .dimmed()
        );
    }
    println!();
}

fn render_warnings(warnings: &[String], verbosity: Verbosity) {
    if warnings.is_empty() || !verbosity.show_warnings() {
        return;
    }
    println!();
    println!("{}", "Warnings:".yellow().bold());
    for warning in warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}

fn render_cycles(cycles: &[Vec<String>]) {
    if cycles.is_empty() {
        return;
    }
    println!();
    println!("{}", "Dependency cycles:".red().bold());
    for cycle in cycles {
        println!("  {} {}", "x".red(), cycle.join(" -> "));
    }
}

/// Pad before coloring so ANSI codes do not break alignment.
fn priority_label(priority: Priority) -> ColoredString {
    let padded = format!("{:<6}", priority.to_string());
    match priority {
        Priority::High => padded.red().bold(),
        Priority::Medium => padded.yellow(),
        Priority::Low => padded.green(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
