//! HTTP API server
//!
//! Thin axum transport over the analysis pipeline. Scoring semantics live in
//! `analysis`; this module only decodes request envelopes, fills in the
//! configured default strategy, and maps transport failures to error payloads.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use colored::*;
use serde_json::json;
use std::collections::HashMap;
use tokio::net::TcpListener;
use tokio::signal;

use crate::analysis::{self, AnalyzeRequest};
use crate::errors::{Result, TaskError};

/// Read-only context shared across request handlers
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Strategy applied when a request does not name one
    pub default_strategy: Option<String>,
}

/// Build the application router.
///
/// Split out from `serve` so integration tests can drive the exact same
/// routes against an ephemeral listener.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/tasks/analyze",
            post(analyze_handler).fallback(post_required),
        )
        .route(
            "/api/tasks/suggest",
            get(suggest_handler).fallback(get_required),
        )
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind the listener and serve requests until Ctrl+C.
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let app = router(state);
    let addr = format!("{}:{}", host, port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| TaskError::ServerError(format!("failed to bind {}: {}", addr, e)))?;

    println!();
    println!("{}", "SmartTask API".cyan().bold());
    println!("  Listening on {}", format!("http://{}", addr).bold());
    println!("  POST /api/tasks/analyze");
    println!("  GET  /api/tasks/suggest");
    println!("  GET  /health");
    println!("{}", "  Press Ctrl+C to stop".dimmed());
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TaskError::ServerError(e.to_string()))?;

    println!("{}", "Server stopped".dimmed());
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}

/// POST /api/tasks/analyze
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// an unparseable envelope becomes a 400 with a stable error payload.
async fn analyze_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let mut request: AnalyzeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid JSON"})),
            )
                .into_response();
        }
    };

    if request.strategy.is_none() {
        request.strategy = state.default_strategy.clone();
    }

    let report = analysis::analyze_tasks(&request, Local::now().date_naive());
    Json(report).into_response()
}

/// GET /api/tasks/suggest
///
/// Task payload arrives URL-encoded in the `tasks` query parameter. Parse
/// failures are reported inside the 200 response as warnings, never as
/// transport errors.
async fn suggest_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let strategy = params
        .get("strategy")
        .cloned()
        .or_else(|| state.default_strategy.clone());

    let report = analysis::suggest_tasks(
        params.get("tasks").map(String::as_str),
        strategy.as_deref(),
        Local::now().date_naive(),
    );

    Json(report).into_response()
}

/// GET /health
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "smarttask",
    }))
}

async fn post_required() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"error": "POST required"})),
    )
        .into_response()
}

async fn get_required() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"error": "GET required"})),
    )
        .into_response()
}
