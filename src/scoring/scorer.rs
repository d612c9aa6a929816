//! Composite task scoring
//!
//! Four-factor weighted scoring with guaranteed bounds:
//! - Bounded output: [0.0, 1.0] after renormalization
//! - Urgency alone may reach 1.5 for overdue tasks before weighting
//! - Every parse failure falls back to a fixed constant
//!
//! The scorer is pure given (task, index, weights, reference date);
//! concurrent batches share nothing but the constant weight presets.

use crate::scoring::strategy::Weights;
use crate::types::{CleanTask, ScoreBreakdown, TaskIndex};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Hours window used to normalize effort; >= 24h scores 0 on that axis
const MAX_EFFORT_HOURS: f64 = 24.0;

/// Urgency assigned when a task has no parseable due date
const NO_DUE_DATE_URGENCY: f64 = 0.1;

/// Effort score assumed when hours are unknown (moderate-high effort)
const UNKNOWN_EFFORT_SCORE: f64 = 0.2;

/// Cap on the overdue urgency boost
const MAX_URGENCY: f64 = 1.5;

/// Blocker count at which the dependency factor saturates
const BLOCKER_SATURATION: f64 = 3.0;

/// Weighted four-factor scorer fixed to one reference date
pub struct TaskScorer {
    /// Active weight preset
    weights: Weights,

    /// Reference date standing in for "today"
    today: NaiveDate,
}

impl TaskScorer {
    /// Create a scorer for one weight preset and reference date
    pub fn new(weights: Weights, today: NaiveDate) -> Self {
        Self { weights, today }
    }

    /// Score one task against the batch index.
    ///
    /// Returns: (unrounded composite in [0.0, 1.0], rounded breakdown)
    ///
    /// Formula:
    /// raw = u × urgency + i × importance + e × effort + d × dependency
    /// score = clamp(raw / (u × 1.5 + i + e + d), 0, 1)
    pub fn score(&self, task: &CleanTask, index: &TaskIndex<'_>) -> (f64, ScoreBreakdown) {
        let urgency = self.urgency(task.due_date.as_deref());
        let importance = normalize_importance(task.importance);
        let effort = effort_score(task.estimated_hours);
        let dependency = dependency_score(&task.id, index);

        let raw = self.weights.urgency * urgency
            + self.weights.importance * importance
            + self.weights.effort * effort
            + self.weights.dependency * dependency;

        let score = (raw / self.weights.theoretical_max()).max(0.0).min(1.0);

        let breakdown = ScoreBreakdown {
            urgency: round3(urgency),
            importance: round3(importance),
            effort: round3(effort),
            dependency: round3(dependency),
        };

        (score, breakdown)
    }

    /// Deadline pressure for an optional due-date string.
    ///
    /// No date, or one that does not parse, yields the low-urgency
    /// constant. Overdue tasks get a boost above 1.0 that saturates
    /// after a week; future tasks decay along a logistic curve whose
    /// midpoint sits 3 days out.
    fn urgency(&self, due_date: Option<&str>) -> f64 {
        let due = match due_date.and_then(parse_date) {
            Some(date) => date,
            None => return NO_DUE_DATE_URGENCY,
        };

        let days_left = (due - self.today).num_days() as f64;
        if days_left < 0.0 {
            return MAX_URGENCY.min(1.0 + (days_left.abs() / 7.0).min(0.5));
        }
        1.0 / (1.0 + ((days_left - 3.0) / 2.5).exp())
    }
}

/// Parse a calendar date from an ISO date or datetime string.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = s.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}

/// Clamp importance to 1..=10 and map it linearly onto [0, 1].
fn normalize_importance(importance: i64) -> f64 {
    let imp = (importance as f64).max(1.0).min(10.0);
    (imp - 1.0) / 9.0
}

/// Inverted effort: quick tasks score high, >= 24h scores zero.
///
/// Unknown effort gets a moderate-high-effort assumption so unknowns
/// are not over-prioritized. Zero or negative hours count as instant.
fn effort_score(estimated_hours: Option<f64>) -> f64 {
    let hours = match estimated_hours {
        Some(h) => h,
        None => return UNKNOWN_EFFORT_SCORE,
    };
    if hours <= 0.0 {
        return 1.0;
    }
    (1.0 - (hours / MAX_EFFORT_HOURS).min(1.0)).max(0.0)
}

/// Count how many tasks in the batch list this one as a prerequisite,
/// saturating at three blockers.
fn dependency_score(task_id: &str, index: &TaskIndex<'_>) -> f64 {
    let blockers = index
        .values()
        .filter(|t| t.dependencies.iter().any(|d| d == task_id))
        .count();
    (blockers as f64 / BLOCKER_SATURATION).min(1.0)
}

/// Round to 3 decimals for presentation.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Build the human-readable tag list for a breakdown.
///
/// Thresholds read the rounded breakdown; the suffix carries the
/// rounded composite score.
pub fn explain(breakdown: &ScoreBreakdown, score: f64) -> String {
    let mut parts = Vec::new();
    if breakdown.urgency > 0.8 {
        parts.push("Urgent");
    }
    if breakdown.importance > 0.6 {
        parts.push("High importance");
    }
    if breakdown.effort > 0.7 {
        parts.push("Quick win");
    }
    if breakdown.dependency > 0.0 {
        parts.push("Blocks other tasks");
    }
    if parts.is_empty() {
        parts.push("Balanced factors");
    }
    format!("{} — score {}", parts.join(", "), round3(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::strategy::Strategy;
    use crate::types::build_index;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, deps: &[&str]) -> CleanTask {
        CleanTask {
            id: id.to_string(),
            title: id.to_string(),
            due_date: None,
            estimated_hours: None,
            importance: 5,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn scorer() -> TaskScorer {
        TaskScorer::new(Strategy::Smart.weights(), day(2025, 11, 27))
    }

    #[test]
    fn test_urgency_logistic_midpoint_at_three_days() {
        let urgency = scorer().urgency(Some("2025-11-30"));
        assert!((urgency - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_urgency_without_due_date() {
        assert!((scorer().urgency(None) - 0.1).abs() < 0.001);
        assert!((scorer().urgency(Some("soon")) - 0.1).abs() < 0.001);
        assert!((scorer().urgency(Some("")) - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_urgency_overdue_boost() {
        let s = scorer();
        // one day overdue: 1 + 1/7
        assert!((s.urgency(Some("2025-11-26")) - (1.0 + 1.0 / 7.0)).abs() < 0.001);
        // saturates at 1.5 from a week overdue onward
        assert!((s.urgency(Some("2025-11-20")) - 1.5).abs() < 0.001);
        assert!((s.urgency(Some("2020-01-01")) - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_urgency_fades_for_distant_deadlines() {
        let s = scorer();
        let due_today = s.urgency(Some("2025-11-27"));
        let next_week = s.urgency(Some("2025-12-04"));
        let next_month = s.urgency(Some("2025-12-27"));

        assert!(due_today > 0.7);
        assert!(next_week < due_today);
        assert!(next_month < 0.001);
    }

    #[test]
    fn test_urgency_accepts_datetime_forms() {
        let s = scorer();
        let plain = s.urgency(Some("2025-11-30"));

        assert!((s.urgency(Some("2025-11-30T14:30:00")) - plain).abs() < 0.001);
        assert!((s.urgency(Some("2025-11-30 14:30:00")) - plain).abs() < 0.001);
        assert!((s.urgency(Some("2025-11-30T14:30:00+02:00")) - plain).abs() < 0.001);
    }

    #[test]
    fn test_importance_normalization() {
        assert!((normalize_importance(1) - 0.0).abs() < 0.001);
        assert!((normalize_importance(10) - 1.0).abs() < 0.001);
        assert!((normalize_importance(5) - 4.0 / 9.0).abs() < 0.001);
    }

    #[test]
    fn test_importance_clamped_before_mapping() {
        assert!((normalize_importance(99) - 1.0).abs() < 0.001);
        assert!((normalize_importance(-5) - 0.0).abs() < 0.001);
        assert!((normalize_importance(0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_effort_score_scale() {
        assert!((effort_score(None) - 0.2).abs() < 0.001);
        assert!((effort_score(Some(0.0)) - 1.0).abs() < 0.001);
        assert!((effort_score(Some(-2.0)) - 1.0).abs() < 0.001);
        assert!((effort_score(Some(6.0)) - 0.75).abs() < 0.001);
        assert!((effort_score(Some(12.0)) - 0.5).abs() < 0.001);
        assert!((effort_score(Some(24.0)) - 0.0).abs() < 0.001);
        assert!((effort_score(Some(500.0)) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_dependency_score_saturates() {
        let batch = vec![
            task("hub", &[]),
            task("a", &["hub"]),
            task("b", &["hub"]),
            task("c", &["hub"]),
            task("d", &["hub"]),
        ];
        let index = build_index(&batch);

        assert!((dependency_score("hub", &index) - 1.0).abs() < 0.001);
        assert!((dependency_score("a", &index) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_dependency_score_partial() {
        let batch = vec![task("hub", &[]), task("a", &["hub"])];
        let index = build_index(&batch);

        assert!((dependency_score("hub", &index) - 1.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_self_dependency_counts_as_blocker() {
        let batch = vec![task("a", &["a"])];
        let index = build_index(&batch);

        assert!((dependency_score("a", &index) - 1.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_score_bounds_under_extremes() {
        let mut overdue = task("t1", &[]);
        overdue.due_date = Some("2019-01-01".to_string());
        overdue.importance = 9999;
        overdue.estimated_hours = Some(-100.0);

        let batch = vec![overdue, task("t2", &["t1"]), task("t3", &["t1"])];
        let index = build_index(&batch);

        for strategy in Strategy::ALL {
            let s = TaskScorer::new(strategy.weights(), day(2025, 11, 27));
            for t in &batch {
                let (score, _) = s.score(t, &index);
                assert!(
                    (0.0..=1.0).contains(&score),
                    "score {} out of bounds under {}",
                    score,
                    strategy
                );
            }
        }
    }

    #[test]
    fn test_breakdown_is_rounded() {
        let mut t = task("t1", &[]);
        t.importance = 5;
        let batch = vec![t];
        let index = build_index(&batch);

        let (_, breakdown) = scorer().score(&batch[0], &index);

        // 4/9 rounds to 0.444 exactly
        assert_eq!(breakdown.importance, 0.444);
    }

    #[test]
    fn test_maxed_factors_reach_full_score() {
        let mut t = task("hub", &[]);
        t.due_date = Some("2025-11-01".to_string());
        t.importance = 10;
        t.estimated_hours = Some(0.0);

        let batch = vec![
            t,
            task("a", &["hub"]),
            task("b", &["hub"]),
            task("c", &["hub"]),
        ];
        let index = build_index(&batch);

        let (score, _) = scorer().score(&batch[0], &index);
        assert!((score - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.4444444), 0.444);
        assert_eq!(round3(0.4445), 0.445);
        assert_eq!(round3(1.0), 1.0);
    }

    #[test]
    fn test_explain_tags() {
        let breakdown = ScoreBreakdown {
            urgency: 0.9,
            importance: 0.7,
            effort: 0.8,
            dependency: 0.333,
        };
        let text = explain(&breakdown, 0.812);

        assert!(text.starts_with("Urgent, High importance, Quick win, Blocks other tasks"));
        assert!(text.ends_with("score 0.812"));
    }

    #[test]
    fn test_explain_balanced_fallback() {
        let breakdown = ScoreBreakdown {
            urgency: 0.5,
            importance: 0.5,
            effort: 0.5,
            dependency: 0.0,
        };

        assert_eq!(explain(&breakdown, 0.41), "Balanced factors — score 0.41");
    }

    #[test]
    fn test_thresholds_are_strict() {
        let breakdown = ScoreBreakdown {
            urgency: 0.8,
            importance: 0.6,
            effort: 0.7,
            dependency: 0.0,
        };

        assert!(explain(&breakdown, 0.5).starts_with("Balanced factors"));
    }
}
