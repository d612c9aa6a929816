//! CLI module for SmartTask
//!
//! Handles command-line argument parsing and task batch loading.

pub mod args;
pub mod batch;

pub use args::{Args, Commands, Verbosity};
pub use batch::{parse_batch, read_batch};
