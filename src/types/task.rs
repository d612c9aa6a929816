//! Task data model
//!
//! `RawTask` is the permissive wire shape: every field may be absent,
//! null, or the wrong type entirely. The validator coerces a batch of
//! raw tasks into `CleanTask` values, and nothing downstream of the
//! validator ever touches a `RawTask` again.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Deserialize a field so that an explicit JSON `null` arrives as
/// `Some(Value::Null)` while an absent field stays `None`.
fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A task exactly as the caller sent it
///
/// Fields keep their raw JSON values so the validator can tell absent,
/// null, and mistyped inputs apart. Unknown fields are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTask {
    /// Caller-supplied identifier (any JSON value)
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,

    /// Short human-readable name (any JSON value)
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Value>,

    /// Target completion date, ideally ISO `YYYY-MM-DD`
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Value>,

    /// Hours of work the caller expects this task to take
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<Value>,

    /// Subjective importance, ideally an integer 1..=10
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub importance: Option<Value>,

    /// Ids of tasks this task depends on
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependencies: Option<Value>,
}

/// A task after validation: every field has a single known type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanTask {
    /// Non-empty identifier, synthetic `__t<index>` when the input had none
    pub id: String,

    /// Non-empty title, `Untitled` when the input had none
    pub title: String,

    /// Due-date string passed through untouched; the scorer parses it
    pub due_date: Option<String>,

    /// Estimated hours, absent when the input was missing or unusable
    pub estimated_hours: Option<f64>,

    /// Importance as supplied, not yet clamped to 1..=10
    pub importance: i64,

    /// Ids of prerequisite tasks
    pub dependencies: Vec<String>,
}

/// Id-keyed view of a clean batch
///
/// Duplicate ids collapse to whichever task appears last in input
/// order; dependency counting runs over the surviving entries.
pub type TaskIndex<'a> = HashMap<&'a str, &'a CleanTask>;

/// Build the id index used by dependency scoring.
pub fn build_index(tasks: &[CleanTask]) -> TaskIndex<'_> {
    tasks.iter().map(|t| (t.id.as_str(), t)).collect()
}
