//! Task batch loading for the CLI
//!
//! Accepts either a bare JSON array of tasks or the same `{"strategy": ...,
//! "tasks": [...]}` envelope the HTTP API takes, from a file or stdin.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::analysis::AnalyzeRequest;
use crate::errors::{Result, TaskError};

/// Load an analyze request from `path`, where `-` means stdin.
///
/// Unlike the HTTP suggest endpoint, batch problems here are hard errors;
/// a CLI run with an unreadable or malformed file should fail loudly.
pub fn read_batch(path: &Path) -> Result<AnalyzeRequest> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    parse_batch(&text)
}

/// Decode batch text into an analyze request.
pub fn parse_batch(text: &str) -> Result<AnalyzeRequest> {
    let value: Value = serde_json::from_str(text)?;

    match value {
        Value::Array(_) => {
            let tasks = serde_json::from_value(value)?;
            Ok(AnalyzeRequest {
                strategy: None,
                tasks: Some(tasks),
            })
        }
        Value::Object(_) => {
            let request = serde_json::from_value(value)?;
            Ok(request)
        }
        _ => Err(TaskError::InvalidRequest(
            "expected a JSON array of tasks or a {\"tasks\": [...]} envelope".to_string(),
        )),
    }
}
