//! stressgauge: heuristic stress scoring for social media content.
//!
//! The [`analyzer`] module holds the scoring engine; [`ingest`] loads exported
//! posts and comments, [`record`] wraps results for storage and [`output`]
//! renders them. The remaining modules support the command line front end.

pub mod analyzer;
pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod ingest;
pub mod logging;
pub mod output;
pub mod record;

pub use analyzer::{BatchReport, ItemScore, StressAnalyzer, StressCategory, TextItem};
pub use record::{analyze_user, AnalysisRecord, AnalysisType, Platform};
