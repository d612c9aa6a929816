//! Type definitions module
//!
//! Core types for the task pipeline: the permissive wire shape, the
//! validated task, and the ranked output records.

pub mod report;
pub mod task;

// Re-export commonly used types
pub use report::{Priority, ScoreBreakdown, ScoredTask, Suggestion};
pub use task::{build_index, CleanTask, RawTask, TaskIndex};
