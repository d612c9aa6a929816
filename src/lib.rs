//! SmartTask - Task Prioritization Engine
//!
//! Scores batches of loosely-structured tasks on urgency, importance,
//! effort, and dependency pressure, then ranks them with a per-task
//! explanation. The pipeline in `analysis` is pure and date-injected;
//! the HTTP server and the CLI are thin transports over it.

// Core pipeline
pub mod analysis;
pub mod errors;
pub mod graph;
pub mod scoring;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use errors::{Result, TaskError};

// Transports and configuration
pub mod cli;
pub mod config;
pub mod display;
pub mod server;
