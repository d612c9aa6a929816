//! Task scoring system
//! Weighted multi-factor scoring under selectable named strategies

pub mod scorer;
pub mod strategy;

pub use scorer::{explain, round3, TaskScorer};
pub use strategy::{Strategy, Weights};
