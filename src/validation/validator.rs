//! Raw task sanitization
//!
//! Turns a loosely typed batch into `CleanTask` values. Every
//! correction is surfaced as a warning string; a batch is never
//! rejected outright.

use crate::types::{CleanTask, RawTask};
use serde_json::Value;

/// Sanitize a raw batch into clean tasks plus correction warnings.
///
/// Output order matches input order, and each task is coerced
/// independently. Malformed fields degrade to defaults instead of
/// failing, so this function cannot reject a batch. The caller's
/// input is never mutated.
pub fn validate_tasks(tasks: &[RawTask]) -> (Vec<CleanTask>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut clean = Vec::with_capacity(tasks.len());

    for (index, raw) in tasks.iter().enumerate() {
        let id = coerce_id(raw.id.as_ref(), index, &mut warnings);
        let title = coerce_title(raw.title.as_ref(), &id, &mut warnings);
        let importance = coerce_importance(raw.importance.as_ref(), &id, &mut warnings);
        let estimated_hours = coerce_hours(raw.estimated_hours.as_ref(), &id, &mut warnings);
        let dependencies = coerce_dependencies(raw.dependencies.as_ref(), &id, &mut warnings);
        let due_date = coerce_due_date(raw.due_date.as_ref());

        clean.push(CleanTask {
            id,
            title,
            due_date,
            estimated_hours,
            importance,
            dependencies,
        });
    }

    (clean, warnings)
}

/// String form of a scalar JSON value; arrays and objects have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Keep a usable id, or assign the synthetic `__t<index>`.
///
/// Non-blank scalars pass through in their string form, untrimmed.
fn coerce_id(value: Option<&Value>, index: usize, warnings: &mut Vec<String>) -> String {
    if let Some(text) = value.and_then(scalar_text) {
        if !text.trim().is_empty() {
            return text;
        }
    }
    let id = format!("__t{}", index);
    warnings.push(format!("Task at index {} missing id; assigned {}", index, id));
    id
}

fn coerce_title(value: Option<&Value>, id: &str, warnings: &mut Vec<String>) -> String {
    if let Some(text) = value.and_then(scalar_text) {
        if !text.trim().is_empty() {
            return text;
        }
    }
    warnings.push(format!("Task {} missing title; set to 'Untitled'", id));
    "Untitled".to_string()
}

/// Integer conversion with a default of 5 on any failure.
///
/// Range clamping to 1..=10 is deliberately left to scoring
/// normalization; out-of-range integers pass through here.
fn coerce_importance(value: Option<&Value>, id: &str, warnings: &mut Vec<String>) -> i64 {
    let value = match value {
        Some(v) => v,
        None => return 5,
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };

    match parsed {
        Some(importance) => importance,
        None => {
            warnings.push(format!("Task {} importance invalid, defaulting to 5", id));
            5
        }
    }
}

/// Float conversion; absent, null, and blank inputs degrade silently,
/// anything else unparseable degrades with a warning.
fn coerce_hours(value: Option<&Value>, id: &str, warnings: &mut Vec<String>) -> Option<f64> {
    match value? {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(hours) => Some(hours),
            Err(_) => {
                warnings.push(format!("Task {} estimated_hours invalid, ignoring", id));
                None
            }
        },
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => {
            warnings.push(format!("Task {} estimated_hours invalid, ignoring", id));
            None
        }
    }
}

/// Pass list elements through in string form; non-list inputs are
/// replaced with an empty list. Elements are not checked against
/// known ids here.
fn coerce_dependencies(value: Option<&Value>, id: &str, warnings: &mut Vec<String>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| scalar_text(item).unwrap_or_else(|| item.to_string()))
            .collect(),
        Some(_) => {
            warnings.push(format!("Task {} dependencies not list; ignoring", id));
            Vec::new()
        }
    }
}

/// Only strings survive; the scorer parses them later and treats
/// anything unparseable as "no deadline".
fn coerce_due_date(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawTask {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_id_assigns_synthetic() {
        let batch = vec![
            raw(json!({"id": "t0", "title": "a"})),
            raw(json!({"id": "t1", "title": "b"})),
            raw(json!({"title": "c"})),
        ];

        let (clean, warnings) = validate_tasks(&batch);

        assert_eq!(clean[2].id, "__t2");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("index 2"));
        assert!(warnings[0].contains("__t2"));
    }

    #[test]
    fn test_blank_id_assigns_synthetic() {
        let (clean, warnings) = validate_tasks(&[raw(json!({"id": "   ", "title": "a"}))]);

        assert_eq!(clean[0].id, "__t0");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_numeric_id_stringified_silently() {
        let (clean, warnings) = validate_tasks(&[raw(json!({"id": 3, "title": "a"}))]);

        assert_eq!(clean[0].id, "3");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_id_whitespace_preserved() {
        let (clean, _) = validate_tasks(&[raw(json!({"id": " t1 ", "title": "a"}))]);

        assert_eq!(clean[0].id, " t1 ");
    }

    #[test]
    fn test_missing_title_defaults_to_untitled() {
        let (clean, warnings) = validate_tasks(&[raw(json!({"id": "t1"}))]);

        assert_eq!(clean[0].title, "Untitled");
        assert_eq!(warnings, vec!["Task t1 missing title; set to 'Untitled'"]);
    }

    #[test]
    fn test_whitespace_title_replaced() {
        let (clean, warnings) = validate_tasks(&[raw(json!({"id": "t1", "title": "  "}))]);

        assert_eq!(clean[0].title, "Untitled");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_null_title_replaced() {
        let (clean, warnings) = validate_tasks(&[raw(json!({"id": "t1", "title": null}))]);

        assert_eq!(clean[0].title, "Untitled");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_importance_missing_defaults_silently() {
        let (clean, warnings) = validate_tasks(&[raw(json!({"id": "t1", "title": "a"}))]);

        assert_eq!(clean[0].importance, 5);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_importance_invalid_warns() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "importance": "oops"}))]);

        assert_eq!(clean[0].importance, 5);
        assert_eq!(
            warnings,
            vec!["Task t1 importance invalid, defaulting to 5"]
        );
    }

    #[test]
    fn test_importance_numeric_string_parses() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "importance": " 8 "}))]);

        assert_eq!(clean[0].importance, 8);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_importance_float_truncates() {
        let (clean, _) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "importance": 7.9}))]);

        assert_eq!(clean[0].importance, 7);
    }

    #[test]
    fn test_importance_out_of_range_passes_through() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "importance": 99}))]);

        assert_eq!(clean[0].importance, 99);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_hours_blank_is_silent() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "estimated_hours": "  "}))]);

        assert_eq!(clean[0].estimated_hours, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_hours_invalid_warns() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "estimated_hours": "soon"}))]);

        assert_eq!(clean[0].estimated_hours, None);
        assert_eq!(warnings, vec!["Task t1 estimated_hours invalid, ignoring"]);
    }

    #[test]
    fn test_hours_string_parses() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "estimated_hours": " 3.5 "}))]);

        assert_eq!(clean[0].estimated_hours, Some(3.5));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_dependencies_not_list_warns() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "dependencies": "t2"}))]);

        assert!(clean[0].dependencies.is_empty());
        assert_eq!(warnings, vec!["Task t1 dependencies not list; ignoring"]);
    }

    #[test]
    fn test_dependencies_null_is_silent() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "dependencies": null}))]);

        assert!(clean[0].dependencies.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_dependency_elements_stringified() {
        let (clean, warnings) = validate_tasks(&[raw(
            json!({"id": "t1", "title": "a", "dependencies": [1, "t2", true]}),
        )]);

        assert_eq!(clean[0].dependencies, vec!["1", "t2", "true"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_due_date_non_string_dropped() {
        let (clean, warnings) =
            validate_tasks(&[raw(json!({"id": "t1", "title": "a", "due_date": 20251130}))]);

        assert_eq!(clean[0].due_date, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_warning_order_follows_field_order() {
        let (_, warnings) = validate_tasks(&[raw(json!({
            "importance": "x",
            "estimated_hours": "y",
            "dependencies": "z"
        }))]);

        assert_eq!(warnings.len(), 5);
        assert!(warnings[0].contains("missing id"));
        assert!(warnings[1].contains("missing title"));
        assert!(warnings[2].contains("importance"));
        assert!(warnings[3].contains("estimated_hours"));
        assert!(warnings[4].contains("dependencies"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let batch = vec![
            raw(json!({"title": "a", "importance": "oops"})),
            raw(json!({"id": "t1", "estimated_hours": 2.5, "dependencies": ["__t0"]})),
        ];
        let (clean, first_warnings) = validate_tasks(&batch);
        assert!(!first_warnings.is_empty());

        let reencoded: Vec<RawTask> = clean
            .iter()
            .map(|t| serde_json::from_value(serde_json::to_value(t).unwrap()).unwrap())
            .collect();
        let (clean_again, warnings) = validate_tasks(&reencoded);

        assert!(warnings.is_empty());
        assert_eq!(clean, clean_again);
    }
}
