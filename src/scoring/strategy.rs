//! Named weight strategies
//!
//! Each strategy is a fixed preset of the four factor weights. The
//! presets are process-wide constants, read-only after startup;
//! callers copy one and never mutate it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight preset for the four scoring factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Weight for the urgency factor
    pub urgency: f64,

    /// Weight for the importance factor
    pub importance: f64,

    /// Weight for the effort factor
    pub effort: f64,

    /// Weight for the dependency factor
    pub dependency: f64,
}

impl Weights {
    /// Highest raw score reachable under these weights.
    ///
    /// Urgency tops out at 1.5 for severely overdue tasks while the
    /// other factors cap at 1.0, so dividing a raw score by this
    /// renormalizes composites into [0, 1].
    pub fn theoretical_max(&self) -> f64 {
        self.urgency * 1.5 + self.importance + self.effort + self.dependency
    }
}

const SMART_WEIGHTS: Weights = Weights {
    urgency: 0.35,
    importance: 0.30,
    effort: 0.20,
    dependency: 0.15,
};

const FASTEST_WEIGHTS: Weights = Weights {
    urgency: 0.20,
    importance: 0.10,
    effort: 0.60,
    dependency: 0.10,
};

const IMPACT_WEIGHTS: Weights = Weights {
    urgency: 0.20,
    importance: 0.70,
    effort: 0.05,
    dependency: 0.05,
};

const DEADLINE_WEIGHTS: Weights = Weights {
    urgency: 0.70,
    importance: 0.20,
    effort: 0.05,
    dependency: 0.05,
};

/// Selectable scoring emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Balanced emphasis with a lean toward deadlines
    Smart,

    /// Effort-dominant, favors quick wins
    Fastest,

    /// Importance-dominant
    Impact,

    /// Urgency-dominant
    Deadline,
}

impl Strategy {
    /// All strategies in presentation order
    pub const ALL: [Strategy; 4] = [
        Strategy::Smart,
        Strategy::Fastest,
        Strategy::Impact,
        Strategy::Deadline,
    ];

    /// Resolve a requested name.
    ///
    /// Anything unrecognized, including no request at all, falls back
    /// to `Smart`. Matching is exact: "Fastest" is not "fastest".
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("fastest") => Strategy::Fastest,
            Some("impact") => Strategy::Impact,
            Some("deadline") => Strategy::Deadline,
            _ => Strategy::Smart,
        }
    }

    /// Weight preset for this strategy
    pub fn weights(&self) -> Weights {
        match self {
            Strategy::Smart => SMART_WEIGHTS,
            Strategy::Fastest => FASTEST_WEIGHTS,
            Strategy::Impact => IMPACT_WEIGHTS,
            Strategy::Deadline => DEADLINE_WEIGHTS,
        }
    }

    /// Wire name of this strategy
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Smart => "smart",
            Strategy::Fastest => "fastest",
            Strategy::Impact => "impact",
            Strategy::Deadline => "deadline",
        }
    }

    /// One-line description for help output
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Smart => "balanced mix of all four factors, urgency-leaning",
            Strategy::Fastest => "quick wins first: low estimated effort dominates",
            Strategy::Impact => "high-importance work dominates",
            Strategy::Deadline => "due and overdue work dominates",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
