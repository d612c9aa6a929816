//! Batch analysis pipeline
//!
//! Shared orchestration behind both the HTTP API and the CLI:
//! validate, detect cycles, score, rank. Requests that reach this
//! module always produce a complete response; malformed content
//! degrades through validation instead of failing.

use crate::graph::detect_cycles;
use crate::scoring::{explain, round3, Strategy, TaskScorer};
use crate::types::{build_index, Priority, RawTask, ScoredTask, Suggestion};
use crate::validation::validate_tasks;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How many entries the suggest operation returns
const SUGGESTION_LIMIT: usize = 3;

/// Request envelope for the analyze operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Requested strategy name; unknown names fall back to smart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Raw task batch; a missing field means an empty batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<RawTask>>,
}

/// Response envelope for the analyze operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Scored tasks, highest score first
    pub tasks: Vec<ScoredTask>,

    /// Corrections applied during validation
    pub warnings: Vec<String>,

    /// Distinct dependency cycles found in the batch
    pub cycles: Vec<Vec<String>>,

    /// Strategy that actually scored the batch
    pub strategy: Strategy,
}

/// Response envelope for the suggest operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    /// Top-ranked tasks, at most three
    pub suggestions: Vec<Suggestion>,

    /// Input problems plus validation corrections
    pub warnings: Vec<String>,

    /// Distinct dependency cycles found in the batch
    pub cycles: Vec<Vec<String>>,

    /// Strategy that actually scored the batch
    pub strategy: Strategy,
}

/// Run the full pipeline over an analyze request.
///
/// `today` is the reference date for urgency; passing it in keeps the
/// pipeline pure and lets callers pin a date for reproducible runs.
pub fn analyze_tasks(request: &AnalyzeRequest, today: NaiveDate) -> AnalyzeResponse {
    let raw = request.tasks.clone().unwrap_or_default();
    let strategy = Strategy::from_name(request.strategy.as_deref());

    let (clean, warnings) = validate_tasks(&raw);
    let cycles = detect_cycles(&clean);
    let index = build_index(&clean);
    let scorer = TaskScorer::new(strategy.weights(), today);

    let mut tasks: Vec<ScoredTask> = clean
        .iter()
        .map(|task| {
            let (score, breakdown) = scorer.score(task, &index);
            ScoredTask {
                id: task.id.clone(),
                title: task.title.clone(),
                due_date: task.due_date.clone(),
                estimated_hours: task.estimated_hours,
                importance: task.importance,
                dependencies: task.dependencies.clone(),
                score: round3(score),
                priority: Priority::from_score(score),
                breakdown,
                explanation: explain(&breakdown, score),
            }
        })
        .collect();

    sort_by_score_desc(&mut tasks, |t| t.score);

    AnalyzeResponse {
        tasks,
        warnings,
        cycles,
        strategy,
    }
}

/// Run the pipeline over a suggest request and keep the top three.
///
/// `tasks_param` is the undecoded value of the `tasks` query
/// parameter. A missing or undecodable value yields an empty
/// suggestion list plus an explanatory warning, never an error.
pub fn suggest_tasks(
    tasks_param: Option<&str>,
    strategy_name: Option<&str>,
    today: NaiveDate,
) -> SuggestResponse {
    let strategy = Strategy::from_name(strategy_name);

    let raw = match parse_tasks_param(tasks_param) {
        Ok(raw) => raw,
        Err(warning) => {
            return SuggestResponse {
                suggestions: Vec::new(),
                warnings: vec![warning],
                cycles: Vec::new(),
                strategy,
            }
        }
    };

    suggest_from_batch(&raw, strategy, today)
}

/// Score an already-decoded batch and keep the top suggestions.
///
/// The CLI feeds file batches through here directly, skipping the
/// query-parameter decoding step.
pub fn suggest_from_batch(
    raw: &[RawTask],
    strategy: Strategy,
    today: NaiveDate,
) -> SuggestResponse {
    let (clean, warnings) = validate_tasks(raw);
    let cycles = detect_cycles(&clean);
    let index = build_index(&clean);
    let scorer = TaskScorer::new(strategy.weights(), today);

    let mut suggestions: Vec<Suggestion> = clean
        .iter()
        .map(|task| {
            let (score, breakdown) = scorer.score(task, &index);
            Suggestion {
                id: task.id.clone(),
                title: task.title.clone(),
                score: round3(score),
                explanation: explain(&breakdown, score),
                priority: Priority::from_score(score),
            }
        })
        .collect();

    sort_by_score_desc(&mut suggestions, |s| s.score);
    suggestions.truncate(SUGGESTION_LIMIT);

    SuggestResponse {
        suggestions,
        warnings,
        cycles,
        strategy,
    }
}

/// Stable descending sort, so equal scores keep input order.
fn sort_by_score_desc<T, F>(items: &mut [T], score: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}

/// Decode the `tasks` query value into a raw batch.
///
/// Returns: the batch, or a single warning describing why there is
/// none. Absent and empty values both count as "not provided".
fn parse_tasks_param(param: Option<&str>) -> Result<Vec<RawTask>, String> {
    let param = match param {
        Some(p) if !p.is_empty() => p,
        _ => return Err("No tasks provided in query param 'tasks'".to_string()),
    };

    let value: serde_json::Value = match serde_json::from_str(param) {
        Ok(value) => value,
        Err(_) => return Err("Invalid JSON in tasks parameter".to_string()),
    };
    if !value.is_array() {
        return Err("tasks must be a JSON array".to_string());
    }

    serde_json::from_value(value)
        .map_err(|_| "tasks must be a JSON array of task objects".to_string())
}
