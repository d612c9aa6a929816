//! Ranked output types
//!
//! Wire shapes produced by the analysis pipeline: per-task scores with
//! their breakdowns, priority bands, and the compact suggestion entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority band derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Band an unrounded composite score.
    ///
    /// Thresholds apply before presentation rounding, so a 0.7496 task
    /// renders as 0.75 yet stays Medium.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            Priority::High
        } else if score >= 0.5 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// The four sub-scores behind a composite score
///
/// Each value is rounded to 3 decimals for presentation. Urgency is
/// the raw component and may exceed 1.0 for overdue tasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Deadline pressure in [0, 1.5]
    pub urgency: f64,

    /// Normalized importance in [0, 1]
    pub importance: f64,

    /// Inverted effort in [0, 1]; quick tasks score high
    pub effort: f64,

    /// Blocker saturation in [0, 1]
    pub dependency: f64,
}

/// A clean task plus everything the ranking produced for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTask {
    pub id: String,
    pub title: String,
    pub due_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub importance: i64,
    pub dependencies: Vec<String>,

    /// Composite score rounded to 3 decimals
    pub score: f64,

    /// Band computed from the unrounded score
    pub priority: Priority,

    pub breakdown: ScoreBreakdown,

    /// Tag list plus the rounded score, e.g. `Urgent, Quick win — score 0.81`
    pub explanation: String,
}

/// Compact entry returned by the suggest operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub score: f64,
    pub explanation: String,
    pub priority: Priority,
}
